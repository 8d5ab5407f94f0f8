use clap::Args;
use storefront_app::domain::{
    addresses::records::AddressId,
    orders::{OrdersService, data::NewPayment, summary::OrderSummary},
};

use crate::{
    cli::{connect, print_json},
    config::DatabaseConfig,
};

#[derive(Debug, Args)]
pub(crate) struct PlaceOrderArgs {
    /// Email of the user whose cart is checked out
    #[arg(long)]
    email: String,

    /// Delivery address; must belong to the user
    #[arg(long)]
    address_id: AddressId,

    #[arg(long)]
    payment_method: String,

    #[arg(long)]
    pg_name: String,

    #[arg(long)]
    pg_payment_id: String,

    #[arg(long)]
    pg_status: String,

    #[arg(long)]
    pg_response_message: String,

    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: PlaceOrderArgs) -> Result<(), String> {
    let ctx = connect(&args.database).await?;

    let summary = place(ctx.orders.as_ref(), args).await?;

    print_json(&summary)
}

async fn place(orders: &dyn OrdersService, args: PlaceOrderArgs) -> Result<OrderSummary, String> {
    let payment = NewPayment {
        payment_method: args.payment_method,
        pg_name: args.pg_name,
        pg_payment_id: args.pg_payment_id,
        pg_status: args.pg_status,
        pg_response_message: args.pg_response_message,
    };

    orders
        .place_order(&args.email, args.address_id, payment)
        .await
        .map_err(|error| format!("failed to place order: {error}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use storefront_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        records::{OrderId, PaymentId},
        summary::PaymentSummary,
    };
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: PlaceOrderArgs,
    }

    fn parse(payment_method: &str) -> PlaceOrderArgs {
        Harness::try_parse_from([
            "place",
            "--email",
            "buyer@x.com",
            "--address-id",
            "3",
            "--payment-method",
            payment_method,
            "--pg-name",
            "Stripe",
            "--pg-payment-id",
            "pi_123",
            "--pg-status",
            "succeeded",
            "--pg-response-message",
            "Payment successful",
            "--database-url",
            "postgres://localhost/storefront",
        ])
        .expect("arguments should parse")
        .args
    }

    fn summary(payment: NewPayment) -> OrderSummary {
        OrderSummary {
            order_id: OrderId::from_i64(1),
            email: "buyer@x.com".to_string(),
            order_items: Vec::new(),
            order_date: date(2026, 10, 18),
            payment: PaymentSummary {
                payment_id: PaymentId::from_i64(1),
                payment_method: payment.payment_method,
                pg_name: payment.pg_name,
                pg_payment_id: payment.pg_payment_id,
                pg_status: payment.pg_status,
                pg_response_message: payment.pg_response_message,
            },
            total_amount: Decimal::new(4998, 2),
            order_status: "Order Accepted !".to_string(),
            address_id: AddressId::from_i64(3),
        }
    }

    #[tokio::test]
    async fn place_passes_arguments_to_the_service() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .times(1)
            .returning(|email, address, payment| {
                assert_eq!(email, "buyer@x.com");
                assert_eq!(address, AddressId::from_i64(3));
                assert_eq!(payment.pg_payment_id, "pi_123");

                Ok(summary(payment))
            });

        let placed = place(&orders, parse("card")).await?;

        assert_eq!(placed.payment.payment_method, "card");
        assert_eq!(placed.total_amount, Decimal::new(4998, 2));

        Ok(())
    }

    #[tokio::test]
    async fn place_reports_service_errors() {
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().times(1).returning(|_, _, _| {
            Err(OrdersServiceError::BusinessRule("Cart is empty!".to_string()))
        });

        let result = place(&orders, parse("card")).await;

        assert_eq!(
            result.err().as_deref(),
            Some("failed to place order: Cart is empty!")
        );
    }
}
