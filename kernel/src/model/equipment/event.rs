use crate::model::id::EquipmentId;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateEquipment {
    pub equipment_name: String,
    pub availability: bool,
}

#[derive(Debug, new)]
pub struct UpdateEquipment {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub availability: bool,
}
