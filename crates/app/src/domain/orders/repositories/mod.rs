mod items;
mod orders;
mod payments;

pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::PgOrdersRepository;
pub(crate) use payments::PgPaymentsRepository;
