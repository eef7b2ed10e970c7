use kernel::model::{equipment::Equipment, id::EquipmentId};

#[derive(sqlx::FromRow)]
pub struct EquipmentRow {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub availability: bool,
}

impl From<EquipmentRow> for Equipment {
    fn from(value: EquipmentRow) -> Self {
        let EquipmentRow {
            equipment_id,
            equipment_name,
            availability,
        } = value;
        Equipment {
            equipment_id,
            equipment_name,
            availability,
        }
    }
}
