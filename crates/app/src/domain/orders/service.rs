//! Orders service.

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        addresses::{records::AddressId, repository::PgAddressesRepository},
        carts::{manager::PgCartManager, records::CartRecord},
        orders::{
            data::{NewOrder, NewOrderItem, NewPayment, ORDER_ACCEPTED},
            errors::OrdersServiceError,
            records::OrderId,
            repositories::{PgOrderItemsRepository, PgOrdersRepository, PgPaymentsRepository},
            summary::OrderSummary,
        },
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    payments: PgPaymentsRepository,
    addresses: PgAddressesRepository,
    products: PgProductsRepository,
    cart_manager: PgCartManager,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            payments: PgPaymentsRepository::new(),
            addresses: PgAddressesRepository::new(),
            products: PgProductsRepository::new(),
            cart_manager: PgCartManager::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, address, payment),
        fields(
            address_id = %address,
            payment_method = %payment.payment_method,
            order_id = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        email: &str,
        address: AddressId,
        payment: NewPayment,
    ) -> Result<OrderSummary, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let CartRecord {
            id: cart,
            total_price,
            items,
            ..
        } = self
            .cart_manager
            .lock_cart_by_email(&mut tx, email)
            .await?
            .ok_or_else(|| OrdersServiceError::cart_not_found(email))?;

        let address = self
            .addresses
            .find_user_address(&mut tx, address, email)
            .await?
            .ok_or_else(|| OrdersServiceError::address_not_found(address))?;

        if items.is_empty() {
            return Err(OrdersServiceError::BusinessRule(
                "Cart is empty!".to_string(),
            ));
        }

        if !payment.has_valid_method() {
            return Err(OrdersServiceError::BusinessRule(
                "Payment method must contain at-least 4 characters".to_string(),
            ));
        }

        let payment = self.payments.create_payment(&mut tx, payment).await?;

        let order = self
            .orders
            .create_order(
                &mut tx,
                NewOrder {
                    email: email.to_string(),
                    order_date: Zoned::now().date(),
                    total_amount: total_price,
                    order_status: ORDER_ACCEPTED.to_string(),
                    address_id: address.id,
                    payment_id: payment.id,
                },
            )
            .await?;

        tracing::Span::current().record("order_id", tracing::field::display(order.id));

        let new_items: Vec<NewOrderItem> = items.iter().map(NewOrderItem::from).collect();

        let order_items = self
            .items
            .create_order_items(&mut tx, order.id, &new_items)
            .await?;

        // Take product row locks in a stable order across checkouts.
        let mut lines = items;
        lines.sort_by_key(|item| item.product_id);

        for line in &lines {
            self.products
                .decrement_stock(&mut tx, line.product_id, line.quantity)
                .await?
                .ok_or_else(|| {
                    OrdersServiceError::BusinessRule(format!(
                        "{} does not have enough stock to fulfil this order",
                        line.product_name
                    ))
                })?;

            self.cart_manager
                .remove_product(&mut tx, cart, line.product_id)
                .await?;
        }

        tx.commit().await?;

        info!(
            order_id = %order.id,
            total_amount = %order.total_amount,
            items = order_items.len(),
            "placed order"
        );

        Ok(OrderSummary::new(order, order_items, payment))
    }

    async fn get_order(
        &self,
        email: &str,
        order: OrderId,
    ) -> Result<OrderSummary, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .orders
            .find_user_order(&mut tx, order, email)
            .await?
            .ok_or_else(|| OrdersServiceError::order_not_found(order))?;

        let items = self.items.get_order_items(&mut tx, order.id).await?;
        let payment = self.payments.get_payment(&mut tx, order.payment_id).await?;

        tx.commit().await?;

        Ok(OrderSummary::new(order, items, payment))
    }

    async fn list_orders(&self, email: &str) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders.list_user_orders(&mut tx, email).await?;

        let mut summaries = Vec::with_capacity(orders.len());

        for order in orders {
            let items = self.items.get_order_items(&mut tx, order.id).await?;
            let payment = self.payments.get_payment(&mut tx, order.payment_id).await?;

            summaries.push(OrderSummary::new(order, items, payment));
        }

        tx.commit().await?;

        Ok(summaries)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the cart owned by `email` into an order shipped to `address`.
    ///
    /// Runs as one unit of work: on any error no payment, order or order item
    /// is stored and the cart and product stock are left as they were. On
    /// success the cart is empty and each product's stock has dropped by the
    /// ordered quantity.
    async fn place_order(
        &self,
        email: &str,
        address: AddressId,
        payment: NewPayment,
    ) -> Result<OrderSummary, OrdersServiceError>;

    /// Retrieve one of the user's orders.
    async fn get_order(
        &self,
        email: &str,
        order: OrderId,
    ) -> Result<OrderSummary, OrdersServiceError>;

    /// Retrieve all of the user's orders, oldest first.
    async fn list_orders(&self, email: &str) -> Result<Vec<OrderSummary>, OrdersServiceError>;
}
