mod broadcast;
mod customer;
mod customer_source;
mod delivery_status;
