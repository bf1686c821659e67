#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every studio crate.
//!
//! * [`macro@studio_error`] turns a plain enum into the workspace's standard error type.
//! * [`macro@studio_slice`] turns a struct into a feature slice registered in the kernel state.
//!
//! Examples are `ignore`d here because proc-macro crates cannot use their own macros in
//! doctests; see `tests/` for compiled usage.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(...)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every variant with a source field.
/// * **Standard Conversions**: Implements `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]`/`#[from]`), enabling `?` on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant is present.
/// * **Kind**: A `kind()` method returning the variant name, for structured log fields and
///   exit codes.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with **named-field** variants.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a `context` field.
///
/// Each error enum should live in its own module: the macro emits a private
/// `format_context` helper next to the enum.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[studio_derive::studio_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Vec<u8>, StoreError> {
///     std::fs::read("settings.json").context("Reading advanced settings")
/// }
/// ```
#[proc_macro_attribute]
pub fn studio_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// This macro transforms a struct into the slice pattern:
/// 1. Moves the fields into a `<Name>Inner` struct.
/// 2. Generates a cheap-to-clone `Arc` wrapper named after the original struct.
/// 3. Implements `Deref` for transparent access to the inner state.
/// 4. Implements `FeatureSlice` for registration in the kernel state.
///
/// # Example
/// ```rust,ignore
/// #[studio_derive::studio_slice]
/// pub struct Commerce {
///     pub coupons: Coupons<StoredLedger>,
/// }
///
/// let slice = Commerce::new(CommerceInner { coupons });
/// ```
#[proc_macro_attribute]
pub fn studio_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
