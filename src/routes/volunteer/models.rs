use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::LocationData;

#[derive(Debug, FromRow)]
pub struct LocationModel {
    pub id: Uuid,
    pub volunteer_id: Uuid,
    pub assignment_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub recorded_on: DateTime<Utc>,
}

impl LocationModel {
    pub fn into_schema(self) -> LocationData {
        LocationData {
            id: self.id,
            volunteer_id: self.volunteer_id,
            assignment_id: self.assignment_id,
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy: self.accuracy,
            recorded_on: self.recorded_on,
        }
    }
}
