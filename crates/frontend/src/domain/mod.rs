pub mod a101_charge_point;
pub mod a102_transaction;
pub mod a103_id_tag;
