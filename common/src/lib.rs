//! Wire types shared between the freight back-office service and its clients.

pub mod model;
pub mod requests;
pub mod responses;
