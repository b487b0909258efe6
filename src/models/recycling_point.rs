use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::required;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecyclingPoint {
    #[serde(skip_serializing)]
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub materials_accepted: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateRecyclingPointRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub materials_accepted: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct NewRecyclingPoint {
    pub name: String,
    pub address: String,
    pub materials_accepted: String,
}

impl CreateRecyclingPointRequest {
    pub fn validate(self) -> Result<NewRecyclingPoint, AppError> {
        let (Some(name), Some(address), Some(materials_accepted)) = (
            required(self.name),
            required(self.address),
            required(self.materials_accepted),
        ) else {
            return Err(AppError::Validation(
                "name, address and materials_accepted are required".into(),
            ));
        };

        Ok(NewRecyclingPoint {
            name,
            address,
            materials_accepted,
        })
    }
}
