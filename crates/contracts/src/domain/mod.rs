pub mod charge_point;
pub mod id_tag;
pub mod transaction;
pub mod user;

pub use charge_point::{ChargePoint, Connector, RemoteCommandRequest, StatusUpdateRequest, CommandAck};
pub use id_tag::{IdTag, IdTagRequest};
pub use transaction::Transaction;
pub use user::{CreateUserRequest, UpdateUserRequest, User};
