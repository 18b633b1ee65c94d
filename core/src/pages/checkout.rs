// storefront/src/pages/checkout.rs

use crate::core::{ContextData, PipelineControl};
use crate::error::{ApiError, ApiResult, PipelineError};
use crate::models::{BuyNowRequest, CreateOrderRequest, CreatePaymentRequest, Order, Payment, PaymentMethod};
use crate::pipeline::Pipeline;
use crate::session::Session;
use crate::state::{OrderState, PaymentState};
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutRequest {
  /// Single product straight from its page.
  BuyNow(BuyNowRequest),
  Cart(CreateOrderRequest),
}

impl CheckoutRequest {
  fn validate(&self) -> ApiResult<()> {
    match self {
      CheckoutRequest::BuyNow(request) => request.validate(),
      CheckoutRequest::Cart(request) => request.validate(),
    }
  }

  fn affiliate_code_mut(&mut self) -> &mut Option<String> {
    match self {
      CheckoutRequest::BuyNow(request) => &mut request.affiliate_code,
      CheckoutRequest::Cart(request) => &mut request.affiliate_code,
    }
  }

  pub fn affiliate_code(&self) -> Option<&str> {
    match self {
      CheckoutRequest::BuyNow(request) => request.affiliate_code.as_deref(),
      CheckoutRequest::Cart(request) => request.affiliate_code.as_deref(),
    }
  }

  pub fn payment_method(&self) -> PaymentMethod {
    match self {
      CheckoutRequest::BuyNow(request) => request.payment_method,
      CheckoutRequest::Cart(request) => request.payment_method,
    }
  }
}

#[derive(Debug, Clone)]
pub struct CheckoutContext {
  pub request: CheckoutRequest,
  pub order: Option<Order>,
  pub payment: Option<Payment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
  pub order: Order,
  pub payment: Payment,
}

/// validate → attach referral → create order → create payment.
///
/// The referral step is skipped when the session holds no affiliate code.
/// Orders and payments go through their stores so the new entities show up
/// first in the lists.
pub fn checkout_pipeline(
  session: Session,
  orders: OrderState,
  payments: PaymentState,
) -> Result<Pipeline<CheckoutContext, ApiError>, PipelineError> {
  let mut pipeline = Pipeline::new(
    "checkout",
    &["validate_checkout", "attach_referral", "create_order", "create_payment"],
  );

  pipeline.on_root("validate_checkout", |ctx: ContextData<CheckoutContext>| async move {
    ctx.read().request.validate()?;
    Ok::<_, ApiError>(PipelineControl::Continue)
  })?;

  let referral_session = session.clone();
  pipeline.set_skip_condition(
    "attach_referral",
    Some(Arc::new(move |_: &ContextData<CheckoutContext>| {
      referral_session.affiliate_code().is_none()
    })),
  )?;
  pipeline.on_root("attach_referral", move |ctx: ContextData<CheckoutContext>| {
    let code = session.affiliate_code();
    async move {
      ctx.update(|c| {
        let slot = c.request.affiliate_code_mut();
        if slot.is_none() {
          *slot = code;
        }
      });
      Ok::<_, ApiError>(PipelineControl::Continue)
    }
  })?;

  pipeline.on_root("create_order", move |ctx: ContextData<CheckoutContext>| {
    let orders = orders.clone();
    async move {
      let request = ctx.read().request.clone();
      let order = match &request {
        CheckoutRequest::BuyNow(r) => orders.buy_now(r).await?,
        CheckoutRequest::Cart(r) => orders.create_order(r).await?,
      };
      event!(Level::INFO, order_id = %order.id, referral = ?request.affiliate_code(), "Checkout order placed.");
      ctx.update(|c| c.order = Some(order));
      Ok::<_, ApiError>(PipelineControl::Continue)
    }
  })?;

  pipeline.on_root("create_payment", move |ctx: ContextData<CheckoutContext>| {
    let payments = payments.clone();
    async move {
      let (order, method) = {
        let c = ctx.read();
        (c.order.clone(), c.request.payment_method())
      };
      let order = order.ok_or_else(|| PipelineError::Internal("create_payment ran without an order".to_string()))?;
      let request = CreatePaymentRequest {
        order_id: order.id.to_string(),
        amount: order.total_amount,
        payment_method: method,
      };
      let payment = payments.create_payment(&request).await?;
      ctx.update(|c| c.payment = Some(payment));
      Ok::<_, ApiError>(PipelineControl::Continue)
    }
  })?;

  Ok(pipeline)
}

#[instrument(name = "pages::run_checkout", skip_all, err(Display))]
pub async fn run_checkout(
  session: &Session,
  orders: &OrderState,
  payments: &PaymentState,
  request: CheckoutRequest,
) -> ApiResult<CheckoutOutcome> {
  let pipeline = checkout_pipeline(session.clone(), orders.clone(), payments.clone())?;
  let ctx = ContextData::new(CheckoutContext {
    request,
    order: None,
    payment: None,
  });
  pipeline.run(ctx.clone()).await?;

  let c = ctx.snapshot();
  match (c.order, c.payment) {
    (Some(order), Some(payment)) => Ok(CheckoutOutcome { order, payment }),
    _ => Err(PipelineError::Internal("checkout finished without an order and payment".to_string()).into()),
  }
}
