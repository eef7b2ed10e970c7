use crate::model::id::EquipmentId;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub availability: bool,
}
