use uuid::Uuid;

use crate::client::ApiClient;
use crate::models::{Vehicle, VehicleStatus, VehicleUpdate};
use crate::notify::Notifier;
use crate::utils::validate::parse_positive;

use super::SubmitState;

/// Edit-vehicle modal on the driver profile. Prices are edited as free text
/// and parsed on save; empty price fields mean "leave unchanged".
#[derive(Debug, Clone)]
pub struct VehicleEditForm {
    driver_id: Uuid,
    original: Vehicle,
    pub maker: String,
    pub model: String,
    pub color: String,
    pub plate_number: String,
    pub manufactured_year: String,
    pub price_per_km: String,
    pub price_per_hour: String,
    pub status: VehicleStatus,
    pub error: Option<String>,
    pub saving: bool,
}

impl VehicleEditForm {
    pub fn new(driver_id: Uuid, vehicle: &Vehicle) -> Self {
        Self {
            driver_id,
            maker: vehicle.maker.clone(),
            model: vehicle.model.clone(),
            color: vehicle.color.clone(),
            plate_number: vehicle.plate_number.clone(),
            manufactured_year: vehicle.manufactured_year.clone(),
            price_per_km: vehicle
                .price_per_km
                .map(|p| p.to_string())
                .unwrap_or_default(),
            price_per_hour: vehicle
                .price_per_hour
                .map(|p| p.to_string())
                .unwrap_or_default(),
            status: vehicle.status,
            original: vehicle.clone(),
            error: None,
            saving: false,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.maker.trim().is_empty() {
            return Err("Maker is required".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("Model is required".to_string());
        }
        if self.plate_number.trim().is_empty() {
            return Err("Plate number is required".to_string());
        }
        if !self.price_per_km.trim().is_empty() && parse_positive(&self.price_per_km).is_none() {
            return Err("Price per km must be a positive number".to_string());
        }
        if !self.price_per_hour.trim().is_empty() && parse_positive(&self.price_per_hour).is_none()
        {
            return Err("Price per hour must be a positive number".to_string());
        }
        Ok(())
    }

    fn price_diff(text: &str, original: Option<f64>) -> Option<f64> {
        let parsed = parse_positive(text)?;
        (Some(parsed) != original).then_some(parsed)
    }

    fn diff(&self) -> VehicleUpdate {
        let mut update = VehicleUpdate::default();
        if self.maker != self.original.maker {
            update.maker = Some(self.maker.clone());
        }
        if self.model != self.original.model {
            update.model = Some(self.model.clone());
        }
        if self.color != self.original.color {
            update.color = Some(self.color.clone());
        }
        if self.plate_number != self.original.plate_number {
            update.plate_number = Some(self.plate_number.clone());
        }
        if self.manufactured_year != self.original.manufactured_year {
            update.manufactured_year = Some(self.manufactured_year.clone());
        }
        update.price_per_km = Self::price_diff(&self.price_per_km, self.original.price_per_km);
        update.price_per_hour =
            Self::price_diff(&self.price_per_hour, self.original.price_per_hour);
        if self.status != self.original.status {
            update.status = Some(self.status);
        }
        update
    }

    pub fn pending_update(&self) -> Result<VehicleUpdate, String> {
        self.validate()?;
        Ok(self.diff())
    }

    pub fn submit_state(&self) -> SubmitState {
        if self.saving {
            SubmitState::Saving
        } else if self.validate().is_err() {
            SubmitState::Blocked
        } else {
            SubmitState::Ready
        }
    }

    /// Returns the updated vehicle on success so the caller can refresh the
    /// profile row without another fetch.
    pub async fn save(
        &mut self,
        client: &ApiClient,
        notifier: &mut dyn Notifier,
    ) -> Option<Vehicle> {
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return None;
        }

        let update = self.diff();
        if update.is_empty() {
            notifier.success("No changes to save");
            return None;
        }

        self.saving = true;
        let result = client.update_driver_vehicle(self.driver_id, &update).await;
        self.saving = false;

        match result {
            Ok(envelope) if envelope.success && envelope.data.is_some() => {
                notifier.success("Vehicle updated successfully");
                envelope.data
            }
            Ok(envelope) => {
                self.error = Some(
                    envelope
                        .errors
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "Failed to update vehicle".to_string()),
                );
                None
            }
            Err(err) => {
                let message = err.user_message();
                self.error = Some(message.clone());
                notifier.error(&message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vehicle() -> Vehicle {
        Vehicle {
            id: 9,
            rider_data_id: 4,
            vehicle_type: "Motorcycle".to_string(),
            plate_number: "ABC-123".to_string(),
            maker: "Honda".to_string(),
            model: "Click 125".to_string(),
            color: "Red".to_string(),
            manufactured_year: "2022".to_string(),
            chassis_number: "CH-001".to_string(),
            engine_number: "EN-001".to_string(),
            transmission_type: "Automatic".to_string(),
            or_photo_url: None,
            cr_photo_url: None,
            front_photo_url: None,
            back_photo_url: None,
            side_photo_url: None,
            ownership_type: "Owned".to_string(),
            description: None,
            status: VehicleStatus::Available,
            price_per_hour: Some(150.0),
            price_per_km: Some(12.5),
            is_verified: true,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unchanged_prices_stay_out_of_the_diff() {
        let form = VehicleEditForm::new(Uuid::new_v4(), &vehicle());
        let update = form.pending_update().unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn edited_price_is_parsed_into_the_diff() {
        let mut form = VehicleEditForm::new(Uuid::new_v4(), &vehicle());
        form.price_per_km = "15".to_string();

        let update = form.pending_update().unwrap();
        assert_eq!(update.price_per_km, Some(15.0));
        assert!(update.price_per_hour.is_none());
    }

    #[test]
    fn non_numeric_price_blocks_the_save() {
        let mut form = VehicleEditForm::new(Uuid::new_v4(), &vehicle());
        form.price_per_hour = "lots".to_string();

        assert_eq!(
            form.pending_update(),
            Err("Price per hour must be a positive number".to_string())
        );
        assert_eq!(form.submit_state(), SubmitState::Blocked);
    }

    #[test]
    fn empty_plate_is_rejected() {
        let mut form = VehicleEditForm::new(Uuid::new_v4(), &vehicle());
        form.plate_number = String::new();
        assert_eq!(
            form.pending_update(),
            Err("Plate number is required".to_string())
        );
    }

    #[test]
    fn maker_and_model_are_required() {
        let mut form = VehicleEditForm::new(Uuid::new_v4(), &vehicle());
        form.maker = "  ".to_string();
        assert_eq!(form.pending_update(), Err("Maker is required".to_string()));
        assert_eq!(form.submit_state(), SubmitState::Blocked);

        form.maker = "Honda".to_string();
        form.model = String::new();
        assert_eq!(form.pending_update(), Err("Model is required".to_string()));
    }

    #[test]
    fn status_change_is_included() {
        let mut form = VehicleEditForm::new(Uuid::new_v4(), &vehicle());
        form.status = VehicleStatus::Maintenance;

        let update = form.pending_update().unwrap();
        assert_eq!(update.status, Some(VehicleStatus::Maintenance));
    }
}
