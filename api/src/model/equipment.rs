use derive_new::new;
use garde::Validate;
use kernel::model::{
    equipment::{
        event::{CreateEquipment, UpdateEquipment},
        Equipment,
    },
    id::EquipmentId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequest {
    #[garde(length(min = 1))]
    pub equipment_name: String,
    #[garde(skip)]
    #[serde(default)]
    pub availability: bool,
}

impl From<CreateEquipmentRequest> for CreateEquipment {
    fn from(value: CreateEquipmentRequest) -> Self {
        CreateEquipment::new(value.equipment_name, value.availability)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentRequest {
    #[garde(length(min = 1))]
    pub equipment_name: String,
    #[garde(skip)]
    pub availability: bool,
}

#[derive(new)]
pub struct UpdateEquipmentRequestWithId(EquipmentId, UpdateEquipmentRequest);

impl From<UpdateEquipmentRequestWithId> for UpdateEquipment {
    fn from(value: UpdateEquipmentRequestWithId) -> Self {
        let UpdateEquipmentRequestWithId(
            equipment_id,
            UpdateEquipmentRequest {
                equipment_name,
                availability,
            },
        ) = value;
        UpdateEquipment::new(equipment_id, equipment_name, availability)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub availability: bool,
}

impl From<Equipment> for EquipmentResponse {
    fn from(value: Equipment) -> Self {
        let Equipment {
            equipment_id,
            equipment_name,
            availability,
        } = value;
        Self {
            equipment_id,
            equipment_name,
            availability,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EquipmentListResponse {
    pub items: Vec<EquipmentResponse>,
}

impl From<Vec<Equipment>> for EquipmentListResponse {
    fn from(value: Vec<Equipment>) -> Self {
        Self {
            items: value.into_iter().map(EquipmentResponse::from).collect(),
        }
    }
}
