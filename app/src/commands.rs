// storefront-console/src/commands.rs

use crate::errors::{ConsoleError, Result};
use crate::render;
use chrono::{Duration, Utc};
use storefront::catalog::CatalogFilter;
use storefront::models::{
  AffiliateLinkInput, BuyNowRequest, OrderQuery, OrderStatus, PaymentMethod, ShippingAddress, UserProfile,
};
use storefront::pages::CheckoutRequest;
use storefront::Storefront;
use tracing::{info, instrument};

pub const USAGE: &str = "\
Usage: storefront <command> [args]

Catalog
  catalog [category|-] [price-label]   list products grouped by category
  product <slug>                       product details and durations
  buy-now <product-id> <duration-id> <full-name> <phone> <address>

Orders and payments
  orders                               your orders
  advance-order <id>                   move an order one step forward (admin)
  set-order-status <id> <STATUS>       set any order status (admin)
  payments                             your payments
  approve-payment <id>                 approve a payment (admin)

Affiliate
  affiliate                            affiliate dashboard
  links                                your referral links
  create-link <product-id> [days]      new referral link, optionally expiring
  disable-link <code>                  disable a referral link
  referral <code>                      remember a referral code

Session
  use-token <token>                    store a customer bearer token
  admin-login <token> <user-json>      store an admin login
  admin-status                         show the admin login and its expiry
  admin-watch                          wait for the admin token to expire
  logout                               clear the customer session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Catalog {
    category: Option<String>,
    price_label: Option<String>,
  },
  Product {
    slug: String,
  },
  BuyNow {
    product_id: String,
    duration_id: String,
    full_name: String,
    phone: String,
    address: String,
  },
  Orders,
  AdvanceOrder {
    id: String,
  },
  SetOrderStatus {
    id: String,
    status: OrderStatus,
  },
  Payments,
  ApprovePayment {
    id: String,
  },
  Affiliate,
  Links,
  CreateLink {
    product_id: String,
    days: Option<i64>,
  },
  DisableLink {
    code: String,
  },
  Referral {
    code: String,
  },
  UseToken {
    token: String,
  },
  AdminLogin {
    token: String,
    user: UserProfile,
  },
  AdminStatus,
  AdminWatch,
  Logout,
  Help,
}

fn arg(args: &[String], index: usize, name: &'static str) -> Result<String> {
  args
    .get(index)
    .map(|a| a.trim().to_string())
    .filter(|a| !a.is_empty())
    .ok_or_else(|| ConsoleError::Usage(format!("Missing <{}>.\n\n{}", name, USAGE)))
}

fn optional(args: &[String], index: usize) -> Option<String> {
  args
    .get(index)
    .map(|a| a.trim().to_string())
    .filter(|a| !a.is_empty() && a != "-")
}

impl Command {
  /// Parses the arguments that follow the program name.
  pub fn parse(args: &[String]) -> Result<Self> {
    let Some(name) = args.first() else {
      return Ok(Command::Help);
    };
    let rest = &args[1..];

    let command = match name.as_str() {
      "catalog" => Command::Catalog {
        category: optional(rest, 0),
        price_label: optional(rest, 1),
      },
      "product" => Command::Product {
        slug: arg(rest, 0, "slug")?,
      },
      "buy-now" => Command::BuyNow {
        product_id: arg(rest, 0, "product-id")?,
        duration_id: arg(rest, 1, "duration-id")?,
        full_name: arg(rest, 2, "full-name")?,
        phone: arg(rest, 3, "phone")?,
        address: arg(rest, 4, "address")?,
      },
      "orders" => Command::Orders,
      "advance-order" => Command::AdvanceOrder { id: arg(rest, 0, "id")? },
      "set-order-status" => Command::SetOrderStatus {
        id: arg(rest, 0, "id")?,
        status: arg(rest, 1, "STATUS")?.parse()?,
      },
      "payments" => Command::Payments,
      "approve-payment" => Command::ApprovePayment { id: arg(rest, 0, "id")? },
      "affiliate" => Command::Affiliate,
      "links" => Command::Links,
      "create-link" => {
        let days = match optional(rest, 1) {
          Some(raw) => Some(parse_days(&raw)?),
          None => None,
        };
        Command::CreateLink {
          product_id: arg(rest, 0, "product-id")?,
          days,
        }
      }
      "disable-link" => Command::DisableLink {
        code: arg(rest, 0, "code")?,
      },
      "referral" => Command::Referral {
        code: arg(rest, 0, "code")?,
      },
      "use-token" => Command::UseToken {
        token: arg(rest, 0, "token")?,
      },
      "admin-login" => {
        let raw_user = arg(rest, 1, "user-json")?;
        let user = serde_json::from_str(&raw_user).map_err(|e| ConsoleError::invalid("user-json", e.to_string()))?;
        Command::AdminLogin {
          token: arg(rest, 0, "token")?,
          user,
        }
      }
      "admin-status" => Command::AdminStatus,
      "admin-watch" => Command::AdminWatch,
      "logout" => Command::Logout,
      "help" | "-h" | "--help" => Command::Help,
      other => return Err(ConsoleError::Usage(format!("Unknown command '{}'.\n\n{}", other, USAGE))),
    };
    Ok(command)
  }
}

fn parse_days(raw: &str) -> Result<i64> {
  match raw.parse::<i64>() {
    Ok(days) if days > 0 => Ok(days),
    Ok(_) => Err(ConsoleError::invalid("days", "must be greater than zero")),
    Err(e) => Err(ConsoleError::invalid("days", e.to_string())),
  }
}

/// Runs one command against the backend and returns the text to print.
#[instrument(name = "console::execute", skip(storefront), err(Display))]
pub async fn execute(command: Command, storefront: &Storefront) -> Result<String> {
  let now = Utc::now();
  let output = match command {
    Command::Help => USAGE.to_string(),

    Command::Catalog { category, price_label } => {
      let filter = CatalogFilter {
        category,
        price_label,
        ..CatalogFilter::default()
      };
      render::catalog(&storefront.catalog(filter).await?)
    }
    Command::Product { slug } => {
      let product = storefront.products().by_slug(&slug).await?;
      let durations = storefront
        .subscription_durations()
        .list(Some(product.id.as_str()), None)
        .await?;
      render::product(&product, &durations)
    }
    Command::BuyNow {
      product_id,
      duration_id,
      full_name,
      phone,
      address,
    } => {
      let request = CheckoutRequest::BuyNow(BuyNowRequest {
        product_id,
        subscription_duration_id: Some(duration_id),
        quantity: 1,
        shipping_address: ShippingAddress {
          full_name,
          phone,
          address,
          ..ShippingAddress::default()
        },
        payment_method: PaymentMethod::BankTransfer,
        affiliate_code: None,
      });
      let orders = storefront.order_state();
      let payments = storefront.payment_state();
      render::checkout(&storefront.checkout(&orders, &payments, request).await?)
    }

    Command::Orders => {
      let orders = storefront.order_state().fetch_orders(&OrderQuery::default()).await?;
      render::orders(&orders)
    }
    Command::AdvanceOrder { id } => {
      let orders = storefront.order_state();
      orders.fetch_order(&id).await?;
      let order = orders.advance(&id).await?;
      format!("Order moved to {}.\n{}", order.status, render::order_row(&order))
    }
    Command::SetOrderStatus { id, status } => {
      let order = storefront.order_state().update_status(&id, status).await?;
      format!("Order status set to {}.\n{}", order.status, render::order_row(&order))
    }
    Command::Payments => render::payments(&storefront.payment_state().fetch_payments().await?),
    Command::ApprovePayment { id } => {
      let payment = storefront.payment_state().approve_payment(&id).await?;
      format!("Payment approved.\n{}", render::payment_row(&payment))
    }

    Command::Affiliate => render::affiliate(&storefront.affiliate_access().await?, now),
    Command::Links => render::links(&storefront.affiliate_link_state().fetch_links().await?, now),
    Command::CreateLink { product_id, days } => {
      let input = AffiliateLinkInput {
        product_id,
        expires_at: days.map(|d| now + Duration::days(d)),
      };
      let link = storefront.affiliate_link_state().create_link(&input).await?;
      format!("Link created.\n{}", render::link_row(&link, now))
    }
    Command::DisableLink { code } => {
      let link = storefront.affiliate_link_state().disable_link(&code).await?;
      format!("Link disabled.\n{}", render::link_row(&link, now))
    }
    Command::Referral { code } => {
      storefront.session().remember_affiliate_code(&code)?;
      format!("Referral code {} will be attached to your next order.", code.trim())
    }

    Command::UseToken { token } => {
      storefront.session().store_token(&token, true)?;
      "Token stored.".to_string()
    }
    Command::AdminLogin { token, user } => {
      let admin = storefront.admin_auth().login(&token, user, now)?;
      render::admin_status(Some(&admin), now)
    }
    Command::AdminStatus => {
      let auth = storefront.admin_auth();
      auth.restore(now);
      render::admin_status(auth.current().as_ref(), now)
    }
    Command::AdminWatch => watch_admin_expiry(storefront).await,
    Command::Logout => {
      storefront.session().logout()?;
      "Signed out.".to_string()
    }
  };
  Ok(output)
}

/// Sleeps until the stored admin token expires, then signs the admin out.
async fn watch_admin_expiry(storefront: &Storefront) -> String {
  let auth = storefront.admin_auth();
  let now = Utc::now();
  if !auth.restore(now) {
    return render::admin_status(None, now);
  }
  let Some(delay) = auth.auto_logout_in(now) else {
    return render::admin_status(auth.current().as_ref(), now);
  };

  info!(seconds = delay.as_secs(), "Waiting for the admin session to expire.");
  tokio::time::sleep(delay).await;
  if auth.enforce_expiry(Utc::now()) {
    "Admin session expired; signed out.".to_string()
  } else {
    render::admin_status(auth.current().as_ref(), Utc::now())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn no_arguments_means_help() {
    assert_eq!(Command::parse(&[]).unwrap(), Command::Help);
  }

  #[test]
  fn catalog_dash_skips_the_category() {
    let command = Command::parse(&args(&["catalog", "-", "Dưới 200.000đ"])).unwrap();
    assert_eq!(
      command,
      Command::Catalog {
        category: None,
        price_label: Some("Dưới 200.000đ".to_string()),
      }
    );
  }

  #[test]
  fn order_status_is_parsed_case_insensitively() {
    let command = Command::parse(&args(&["set-order-status", "o1", "shipped"])).unwrap();
    assert_eq!(
      command,
      Command::SetOrderStatus {
        id: "o1".to_string(),
        status: OrderStatus::Shipped,
      }
    );
    assert!(Command::parse(&args(&["set-order-status", "o1", "LOST"])).is_err());
  }

  #[test]
  fn link_days_must_be_positive() {
    let command = Command::parse(&args(&["create-link", "p1", "30"])).unwrap();
    assert_eq!(
      command,
      Command::CreateLink {
        product_id: "p1".to_string(),
        days: Some(30),
      }
    );
    let err = Command::parse(&args(&["create-link", "p1", "0"])).unwrap_err();
    assert!(err.to_string().contains("days"));
  }

  #[test]
  fn admin_login_reads_the_user_json() {
    let command = Command::parse(&args(&[
      "admin-login",
      "tok",
      r#"{"_id":"u9","email":"root@shop.test","role":"admin"}"#,
    ]))
    .unwrap();
    match command {
      Command::AdminLogin { token, user } => {
        assert_eq!(token, "tok");
        assert!(user.is_admin());
      }
      other => panic!("unexpected command {:?}", other),
    }
  }

  #[test]
  fn missing_argument_prints_usage() {
    let err = Command::parse(&args(&["product"])).unwrap_err();
    assert!(matches!(err, ConsoleError::Usage(_)));
    assert!(err.to_string().starts_with("Missing <slug>."));
  }

  #[test]
  fn unknown_command_is_rejected() {
    assert!(matches!(
      Command::parse(&args(&["teleport"])),
      Err(ConsoleError::Usage(_))
    ));
  }
}
