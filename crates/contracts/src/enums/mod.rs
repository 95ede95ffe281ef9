pub mod charge_point_status;
pub mod id_tag_status;
pub mod remote_command;
pub mod transaction_status;
pub mod user_role;
pub mod user_status;

pub use charge_point_status::ChargePointStatus;
pub use id_tag_status::IdTagStatus;
pub use remote_command::RemoteCommandKind;
pub use transaction_status::TransactionStatus;
pub use user_role::UserRole;
pub use user_status::UserStatus;
