// storefront-console/src/render.rs

//! Text renderers. Each one is a pure function of the state it is given.

use chrono::{DateTime, Utc};
use storefront::catalog::{format_vnd, CatalogView};
use storefront::models::{
  AffiliateLink, AffiliateLinkStatus, AffiliateProfile, AffiliateStats, Order, Payment, PaymentStatus, Product,
  SubscriptionDuration,
};
use storefront::pages::{AffiliateAccess, CheckoutOutcome};
use storefront::state::AdminSession;

pub const EMPTY_CATALOG: &str = "No products found.";

fn price_span(product: &Product) -> String {
  match (product.min_price, product.max_price) {
    (Some(min), Some(max)) if max > min => format!("{} - {}", format_vnd(min), format_vnd(max)),
    (Some(price), _) | (None, Some(price)) => format_vnd(price),
    (None, None) => "-".to_string(),
  }
}

fn date(at: Option<DateTime<Utc>>) -> String {
  at.map(|at| at.format("%Y-%m-%d").to_string())
    .unwrap_or_else(|| "-".to_string())
}

pub fn catalog(view: &CatalogView) -> String {
  if view.is_empty() {
    return EMPTY_CATALOG.to_string();
  }
  let mut lines = Vec::new();
  for section in &view.sections {
    lines.push(format!("== {} ({}) ==", section.category.name, section.products.len()));
    for product in &section.products {
      let slug = product.slug.as_deref().unwrap_or(product.id.as_str());
      lines.push(format!("  {:<32} {:>24}  [{}]", product.name, price_span(product), slug));
    }
  }
  lines.push(format!("{} product(s)", view.total));
  lines.join("\n")
}

pub fn product(product: &Product, durations: &[SubscriptionDuration]) -> String {
  let mut lines = vec![format!("{}  ({})", product.name, price_span(product))];
  if let Some(description) = product.description.as_deref().filter(|d| !d.trim().is_empty()) {
    lines.push(description.trim().to_string());
  }
  if durations.is_empty() {
    lines.push("No subscription durations available.".to_string());
  }
  for duration in durations {
    lines.push(format!(
      "  - {:<16} {:>4} days  {:>14}  [{}]",
      duration.label,
      duration.days,
      format_vnd(duration.price),
      duration.id.as_str()
    ));
  }
  lines.join("\n")
}

pub fn order_row(order: &Order) -> String {
  let hint = match order.status.next() {
    Some(next) => format!("next: {}", next.as_str()),
    None => "final".to_string(),
  };
  format!(
    "#{:<26} {:<11} {:>14}  {}  {}",
    order.id.as_str(),
    order.status.as_str(),
    format_vnd(order.total_amount),
    date(order.created_at),
    hint
  )
}

pub fn orders(orders: &[Order]) -> String {
  if orders.is_empty() {
    return "No orders yet.".to_string();
  }
  orders.iter().map(order_row).collect::<Vec<_>>().join("\n")
}

pub fn payment_badge(status: PaymentStatus) -> String {
  let label = match status {
    PaymentStatus::Pending => "awaiting payment",
    PaymentStatus::Processing => "verifying",
    PaymentStatus::Completed => "paid",
    PaymentStatus::Failed => "failed",
    PaymentStatus::Cancelled => "cancelled",
  };
  format!("[{}: {}]", status.as_str(), label)
}

pub fn payment_row(payment: &Payment) -> String {
  format!(
    "#{:<26} order #{:<26} {:>14}  {:<16} {}",
    payment.id.as_str(),
    payment.order_id.as_str(),
    format_vnd(payment.amount),
    payment.payment_method.to_string(),
    payment_badge(payment.status)
  )
}

pub fn payments(payments: &[Payment]) -> String {
  if payments.is_empty() {
    return "No payments yet.".to_string();
  }
  payments.iter().map(payment_row).collect::<Vec<_>>().join("\n")
}

pub fn link_row(link: &AffiliateLink, now: DateTime<Utc>) -> String {
  let status = match link.effective_status(now) {
    AffiliateLinkStatus::Active => "ACTIVE",
    AffiliateLinkStatus::Expired => "EXPIRED",
    AffiliateLinkStatus::Disabled => "DISABLED",
  };
  format!(
    "{:<16} {:<9} {:>6} clicks {:>5} conv ({:.1}%)  {:>14}  expires {}  {}",
    link.code,
    status,
    link.clicks,
    link.conversions,
    link.conversion_rate(),
    format_vnd(link.commission_earned),
    date(link.expires_at),
    link.short_url
  )
}

pub fn links(links: &[AffiliateLink], now: DateTime<Utc>) -> String {
  if links.is_empty() {
    return "No affiliate links yet.".to_string();
  }
  links.iter().map(|l| link_row(l, now)).collect::<Vec<_>>().join("\n")
}

fn profile_header(profile: &AffiliateProfile) -> String {
  format!(
    "Affiliate {} ({}), commission {}%",
    profile.affiliate_code,
    profile.status.as_str(),
    profile.commission_rate
  )
}

fn stats_block(stats: &AffiliateStats) -> Vec<String> {
  vec![
    format!(
      "Clicks {}  Conversions {}  Rate {:.1}%  Active links {}",
      stats.total_clicks, stats.total_conversions, stats.conversion_rate, stats.active_links
    ),
    format!(
      "Earnings {}  Pending {}  Paid {}",
      format_vnd(stats.total_earnings),
      format_vnd(stats.pending_earnings),
      format_vnd(stats.paid_earnings)
    ),
  ]
}

pub fn affiliate(access: &AffiliateAccess, now: DateTime<Utc>) -> String {
  match access {
    AffiliateAccess::Anonymous => "Sign in to see the affiliate program.".to_string(),
    AffiliateAccess::NotRegistered => "You are not an affiliate yet. Register to start earning commission.".to_string(),
    AffiliateAccess::Inactive(profile) => format!(
      "{}\nYour affiliate account is not active. Links and payouts are unavailable.",
      profile_header(profile)
    ),
    AffiliateAccess::Active { profile, stats, links: l } => {
      let mut lines = vec![profile_header(profile)];
      lines.extend(stats_block(stats));
      lines.push(String::new());
      lines.push(links(l, now));
      lines.join("\n")
    }
  }
}

pub fn admin_status(admin: Option<&AdminSession>, now: DateTime<Utc>) -> String {
  let Some(admin) = admin else {
    return "Not signed in as admin.".to_string();
  };
  let expiry = match admin.expires_at {
    Some(at) => {
      let minutes = (at - now).num_minutes().max(0);
      format!("expires {} ({} min left)", at.format("%Y-%m-%d %H:%M UTC"), minutes)
    }
    None => "no expiry".to_string(),
  };
  format!("Admin {} <{}>, {}", admin.user.display_name(), admin.user.email, expiry)
}

pub fn checkout(outcome: &CheckoutOutcome) -> String {
  format!(
    "Order placed.\n{}\n{}",
    order_row(&outcome.order),
    payment_row(&outcome.payment)
  )
}
