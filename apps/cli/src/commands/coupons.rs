use crate::args::CouponAction;
use std::io::Write;
use studio::domain::coupons::Coupon;
use studio::domain::course::CourseKey;
use studio::domain::roles::CourseRoles;
use studio::features::commerce::coupons::notices;
use studio::features::commerce::{Commerce, CouponForm, parse_coupon_id};

pub(crate) async fn handle(
    commerce: &Commerce,
    course: &CourseKey,
    action: &CouponAction,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let coupons = &commerce.coupons;

    match action {
        CouponAction::List => {
            for coupon in coupons.list(course).await? {
                write_coupon(out, &coupon)?;
            }
        },
        CouponAction::Add { code, description, discount, created_by } => {
            let form = form(code, description, discount);
            let coupon = coupons.create(course, &form, created_by).await?;
            writeln!(out, "{}", notices::added(coupon.code()))?;
        },
        CouponAction::Update { id, code, description, discount } => {
            let form = form(code, description, discount);
            let coupon = coupons.update(course, parse_coupon_id(id)?, &form).await?;
            writeln!(out, "{}", notices::saved(coupon.id))?;
        },
        CouponAction::Remove { id } => {
            let coupon = coupons.deactivate(course, parse_coupon_id(id)?).await?;
            writeln!(out, "{}", notices::updated(coupon.id))?;
        },
        CouponAction::Info { id } => {
            write_coupon(out, &coupons.info(course, parse_coupon_id(id)?).await?)?;
        },
        CouponAction::Purchase { user, amount_cents } => {
            let registration = coupons.record_purchase(course, user, *amount_cents).await?;
            writeln!(
                out,
                "Recorded purchase by {} ({} cents).",
                registration.user, registration.amount_cents
            )?;
        },
    }
    Ok(())
}

pub(crate) async fn dashboard(
    commerce: &Commerce,
    course: &CourseKey,
    roles: &[String],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let roles =
        roles.iter().fold(CourseRoles::empty(), |acc, role| acc | CourseRoles::from(role.as_str()));
    let dashboard = commerce.coupons.dashboard(course, roles).await?;

    writeln!(out, "Coupons: {}", dashboard.coupons.len())?;
    for coupon in &dashboard.coupons {
        write_coupon(out, coupon)?;
    }
    if let Some(cents) = dashboard.total_sales_cents {
        let currency = dashboard.currency.to_uppercase();
        writeln!(out, "Total sales: {}.{:02} {currency}", cents / 100, cents % 100)?;
    }
    Ok(())
}

fn form(code: &str, description: &str, discount: &str) -> CouponForm {
    CouponForm {
        code: code.to_owned(),
        description: description.to_owned(),
        discount: discount.to_owned(),
    }
}

fn write_coupon(out: &mut impl Write, coupon: &Coupon) -> std::io::Result<()> {
    let status = if coupon.is_active() { "active" } else { "inactive" };
    writeln!(
        out,
        "{}\t{}\t{}%\t{status}\t{}",
        coupon.id,
        coupon.code(),
        coupon.details.percentage_discount,
        coupon.details.description
    )
}
