use reqwest::multipart;

use crate::client::{ApiClient, UploadFile};
use crate::error::ApiResult;

// ============ Option Lists ============

pub const SERVICE_REGIONS: [&str; 2] = ["Bacolod City", "Negros Occidental"];
pub const VEHICLE_TYPES: [&str; 2] = ["Motorcycle", "Scooter"];
pub const TIME_ALLOCATIONS: [&str; 3] = ["Full-time", "Part-time", "Flexible"];
pub const SEX_OPTIONS: [&str; 2] = ["Male", "Female"];
pub const LICENSE_LEVELS: [&str; 2] = ["Non-Pro", "Professional"];
pub const TRANSMISSION_TYPES: [&str; 3] = ["Manual", "Automatic", "Semi-Automatic"];
pub const OWNERSHIP_OPTIONS: [&str; 3] = ["Owned", "Financed", "Rented"];

pub const BARANGAYS: [&str; 19] = [
    "Alijis",
    "Alangilan",
    "Banago",
    "Bata",
    "Cabug",
    "Estefania",
    "Felisa",
    "Granada",
    "Handumanan",
    "Mandalagan",
    "Mansilingan",
    "Montevista",
    "Pahanocoy",
    "Punta Taytay",
    "Singcang-Airport",
    "Sum-ag",
    "Taculing",
    "Tangub",
    "Villamonte",
];

const MIN_PASSWORD_LEN: usize = 6;

// ============ Wizard Steps ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    ServiceInfo,
    Personal,
    Address,
    License,
    EmergencyContact,
    Vehicle,
    Documents,
    Confirm,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::ServiceInfo,
        Step::Personal,
        Step::Address,
        Step::License,
        Step::EmergencyContact,
        Step::Vehicle,
        Step::Documents,
        Step::Confirm,
    ];

    /// One-based position, for "Step 3 of 8" headers.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::ServiceInfo => "Service Information",
            Step::Personal => "Personal Information",
            Step::Address => "Address",
            Step::License => "License Information",
            Step::EmergencyContact => "Emergency Contact",
            Step::Vehicle => "Vehicle Information",
            Step::Documents => "Documents",
            Step::Confirm => "Review & Confirm",
        }
    }

    fn next(&self) -> Option<Step> {
        Self::ALL.get(self.index()).copied()
    }

    fn prev(&self) -> Option<Step> {
        self.index().checked_sub(2).map(|i| Self::ALL[i])
    }
}

// ============ Application Data ============

/// Everything the registration endpoint accepts as text fields. All values
/// are kept as entered; trimming and format rules live in the step checks.
#[derive(Debug, Clone)]
pub struct DriverApplication {
    pub service_region: String,
    pub vehicle_type: String,
    pub time_allocation: String,

    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub sex: String,
    pub password: String,
    pub confirm_password: String,

    pub barangay: String,
    pub city: String,
    pub province: String,

    pub license_level: String,
    pub license_number: String,
    pub license_expiry_date: String,
    pub tin: String,
    pub sss: String,

    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub emergency_contact_relationship: String,

    pub vehicle_maker: String,
    pub vehicle_model: String,
    pub vehicle_color: String,
    pub plate_number: String,
    pub manufactured_year: String,
    pub chassis_number: String,
    pub engine_number: String,
    pub transmission_type: String,
    pub vehicle_ownership: String,

    pub data_privacy_consent: bool,
    pub background_check_consent: bool,
}

impl Default for DriverApplication {
    fn default() -> Self {
        Self {
            service_region: String::new(),
            vehicle_type: String::new(),
            time_allocation: String::new(),
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            date_of_birth: String::new(),
            sex: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            barangay: String::new(),
            city: "Bacolod City".to_string(),
            province: "Negros Occidental".to_string(),
            license_level: String::new(),
            license_number: String::new(),
            license_expiry_date: String::new(),
            tin: String::new(),
            sss: String::new(),
            emergency_contact_name: String::new(),
            emergency_contact_number: String::new(),
            emergency_contact_relationship: String::new(),
            vehicle_maker: String::new(),
            vehicle_model: String::new(),
            vehicle_color: String::new(),
            plate_number: String::new(),
            manufactured_year: String::new(),
            chassis_number: String::new(),
            engine_number: String::new(),
            transmission_type: String::new(),
            vehicle_ownership: String::new(),
            data_privacy_consent: false,
            background_check_consent: false,
        }
    }
}

/// Document uploads. Every one is optional at submit time; the backend flags
/// missing requirements during verification.
#[derive(Debug, Clone, Default)]
pub struct DriverFiles {
    pub profile_photo: Option<UploadFile>,
    pub license_photo: Option<UploadFile>,
    pub vehicle_or: Option<UploadFile>,
    pub vehicle_cr: Option<UploadFile>,
    pub vehicle_front_photo: Option<UploadFile>,
    pub vehicle_back_photo: Option<UploadFile>,
    pub vehicle_side_photo: Option<UploadFile>,
    pub fit_to_work_certificate: Option<UploadFile>,
}

impl DriverFiles {
    fn parts(self) -> Vec<(&'static str, UploadFile)> {
        let mut parts = Vec::new();
        let mut push = |name, file: Option<UploadFile>| {
            if let Some(file) = file {
                parts.push((name, file));
            }
        };
        push("profilePhoto", self.profile_photo);
        push("licensePhoto", self.license_photo);
        push("vehicleOR", self.vehicle_or);
        push("vehicleCR", self.vehicle_cr);
        push("vehicleFrontPhoto", self.vehicle_front_photo);
        push("vehicleBackPhoto", self.vehicle_back_photo);
        push("vehicleSidePhoto", self.vehicle_side_photo);
        push("fitToWorkCertificate", self.fit_to_work_certificate);
        parts
    }
}

// ============ Wizard ============

/// Eight-step driver registration wizard. Moving forward is gated on the
/// current step's check; moving back never is.
pub struct DriverApplicationForm {
    pub step: Step,
    pub application: DriverApplication,
    pub files: DriverFiles,
    pub error: Option<String>,
    pub submitting: bool,
}

impl DriverApplicationForm {
    pub fn new() -> Self {
        Self {
            step: Step::ServiceInfo,
            application: DriverApplication::default(),
            files: DriverFiles::default(),
            error: None,
            submitting: false,
        }
    }

    fn validate_step(&self) -> Result<(), String> {
        let a = &self.application;
        let filled = |fields: &[&String]| fields.iter().all(|f| !f.trim().is_empty());

        match self.step {
            Step::ServiceInfo => {
                if !filled(&[&a.service_region, &a.vehicle_type, &a.time_allocation]) {
                    return Err("Please fill in all service information fields".to_string());
                }
            }
            Step::Personal => {
                if !filled(&[
                    &a.first_name,
                    &a.last_name,
                    &a.email,
                    &a.password,
                    &a.date_of_birth,
                    &a.sex,
                    &a.phone_number,
                ]) {
                    return Err("Please fill in all personal information fields".to_string());
                }
                if a.password != a.confirm_password {
                    return Err("Passwords do not match".to_string());
                }
                if a.password.len() < MIN_PASSWORD_LEN {
                    return Err("Password must be at least 6 characters".to_string());
                }
            }
            Step::Address => {
                if a.barangay.trim().is_empty() {
                    return Err("Please select a barangay".to_string());
                }
            }
            Step::License => {
                if !filled(&[&a.license_level, &a.license_number, &a.license_expiry_date]) {
                    return Err("Please fill in all license information".to_string());
                }
            }
            Step::EmergencyContact => {
                if !filled(&[
                    &a.emergency_contact_name,
                    &a.emergency_contact_number,
                    &a.emergency_contact_relationship,
                ]) {
                    return Err("Please fill in all emergency contact information".to_string());
                }
            }
            Step::Vehicle => {
                if !filled(&[
                    &a.plate_number,
                    &a.vehicle_maker,
                    &a.vehicle_model,
                    &a.vehicle_color,
                    &a.manufactured_year,
                    &a.chassis_number,
                    &a.engine_number,
                    &a.transmission_type,
                    &a.vehicle_ownership,
                ]) {
                    return Err("Please fill in all vehicle information".to_string());
                }
            }
            Step::Documents => {}
            Step::Confirm => {
                if !(a.data_privacy_consent && a.background_check_consent) {
                    return Err("Please accept all required agreements".to_string());
                }
            }
        }
        Ok(())
    }

    /// Advances if the current step passes its check; returns whether the
    /// wizard moved.
    pub fn next(&mut self) -> bool {
        match self.validate_step() {
            Ok(()) => {
                self.error = None;
                if let Some(step) = self.step.next() {
                    self.step = step;
                    true
                } else {
                    false
                }
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    pub fn back(&mut self) -> bool {
        self.error = None;
        if let Some(step) = self.step.prev() {
            self.step = step;
            true
        } else {
            false
        }
    }

    /// Text parts of the registration payload, keyed exactly as the backend
    /// expects them. Empty values are skipped; the consent booleans are
    /// always present as "true"/"false".
    fn text_fields(&self) -> Vec<(&'static str, String)> {
        let a = &self.application;
        let mut fields: Vec<(&'static str, String)> = [
            ("serviceRegion", &a.service_region),
            ("vehicleType", &a.vehicle_type),
            ("timeAllocation", &a.time_allocation),
            ("firstName", &a.first_name),
            ("middleName", &a.middle_name),
            ("lastName", &a.last_name),
            ("email", &a.email),
            ("password", &a.password),
            ("confirmPassword", &a.confirm_password),
            ("dateOfBirth", &a.date_of_birth),
            ("sex", &a.sex),
            ("phoneNumber", &a.phone_number),
            ("barangay", &a.barangay),
            ("city", &a.city),
            ("province", &a.province),
            ("licenseLevel", &a.license_level),
            ("licenseNumber", &a.license_number),
            ("licenseExpiryDate", &a.license_expiry_date),
            ("emergencyContactName", &a.emergency_contact_name),
            ("emergencyContactNumber", &a.emergency_contact_number),
            (
                "emergencyContactRelationship",
                &a.emergency_contact_relationship,
            ),
            ("plateNumber", &a.plate_number),
            ("vehicleMaker", &a.vehicle_maker),
            ("vehicleModel", &a.vehicle_model),
            ("vehicleColor", &a.vehicle_color),
            ("manufacturedYear", &a.manufactured_year),
            ("chassisNumber", &a.chassis_number),
            ("engineNumber", &a.engine_number),
            ("transmissionType", &a.transmission_type),
            ("vehicleOwnership", &a.vehicle_ownership),
            ("tin", &a.tin),
            ("sss", &a.sss),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(name, value)| (name, value.clone()))
        .collect();

        fields.push(("dataPrivacyConsent", a.data_privacy_consent.to_string()));
        fields.push((
            "backgroundCheckConsent",
            a.background_check_consent.to_string(),
        ));
        fields
    }

    pub fn multipart_form(&self) -> ApiResult<multipart::Form> {
        let mut form = multipart::Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }

        for (name, file) in self.files.clone().parts() {
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            form = form.part(name, part);
        }

        Ok(form)
    }

    /// Submits from the Confirm step. On success the wizard resets for the
    /// next application; on failure it stays put with an inline error.
    pub async fn submit(&mut self, client: &ApiClient) -> bool {
        if let Err(message) = self.validate_step() {
            self.error = Some(message);
            return false;
        }

        let form = match self.multipart_form() {
            Ok(form) => form,
            Err(err) => {
                self.error = Some(err.user_message());
                return false;
            }
        };

        self.submitting = true;
        let result = client.register_driver(form).await;
        self.submitting = false;

        match result {
            Ok(envelope) if envelope.success => {
                *self = Self::new();
                true
            }
            Ok(envelope) => {
                self.error = Some(
                    envelope
                        .errors
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "Registration failed".to_string()),
                );
                false
            }
            Err(err) => {
                self.error = Some(err.user_message());
                false
            }
        }
    }
}

impl Default for DriverApplicationForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_at_personal() -> DriverApplicationForm {
        let mut form = DriverApplicationForm::new();
        form.application.service_region = "Bacolod City".to_string();
        form.application.vehicle_type = "Motorcycle".to_string();
        form.application.time_allocation = "Full-time".to_string();
        assert!(form.next());
        assert_eq!(form.step, Step::Personal);
        form
    }

    fn fill_personal(form: &mut DriverApplicationForm) {
        let a = &mut form.application;
        a.first_name = "Juan".to_string();
        a.last_name = "Dela Cruz".to_string();
        a.email = "juan@sakay.to".to_string();
        a.phone_number = "+639171234567".to_string();
        a.date_of_birth = "1995-06-01".to_string();
        a.sex = "Male".to_string();
        a.password = "hunter22".to_string();
        a.confirm_password = "hunter22".to_string();
    }

    fn fill_vehicle(form: &mut DriverApplicationForm) {
        let a = &mut form.application;
        a.vehicle_maker = "Honda".to_string();
        a.vehicle_model = "Click 125".to_string();
        a.vehicle_color = "Red".to_string();
        a.plate_number = "ABC-123".to_string();
        a.manufactured_year = "2022".to_string();
        a.chassis_number = "CH-001".to_string();
        a.engine_number = "EN-001".to_string();
        a.transmission_type = "Automatic".to_string();
        a.vehicle_ownership = "Owned".to_string();
    }

    #[test]
    fn empty_service_info_blocks_the_first_step() {
        let mut form = DriverApplicationForm::new();
        assert!(!form.next());
        assert_eq!(form.step, Step::ServiceInfo);
        assert_eq!(
            form.error.as_deref(),
            Some("Please fill in all service information fields")
        );
    }

    #[test]
    fn password_mismatch_does_not_advance() {
        let mut form = form_at_personal();
        fill_personal(&mut form);
        form.application.confirm_password = "different".to_string();

        assert!(!form.next());
        assert_eq!(form.step, Step::Personal);
        assert_eq!(form.error.as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn short_password_is_rejected() {
        let mut form = form_at_personal();
        fill_personal(&mut form);
        form.application.password = "abc".to_string();
        form.application.confirm_password = "abc".to_string();

        assert!(!form.next());
        assert_eq!(
            form.error.as_deref(),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn back_is_never_gated() {
        let mut form = form_at_personal();
        assert!(form.back());
        assert_eq!(form.step, Step::ServiceInfo);
        assert!(form.error.is_none());
        assert!(!form.back());
    }

    #[test]
    fn documents_step_passes_without_files() {
        let mut form = DriverApplicationForm::new();
        form.step = Step::Documents;
        assert!(form.next());
        assert_eq!(form.step, Step::Confirm);
    }

    #[test]
    fn confirm_requires_both_agreements() {
        let mut form = DriverApplicationForm::new();
        form.step = Step::Confirm;
        form.application.data_privacy_consent = true;

        assert!(!form.next());
        assert_eq!(
            form.error.as_deref(),
            Some("Please accept all required agreements")
        );
    }

    #[test]
    fn both_agreements_unblock_submission() {
        let mut form = DriverApplicationForm::new();
        form.step = Step::Confirm;
        form.application.data_privacy_consent = true;
        form.application.background_check_consent = true;

        // Already on the last step, so the wizard does not move, but the
        // check passes and no error is raised.
        assert!(!form.next());
        assert!(form.error.is_none());
    }

    #[test]
    fn payload_uses_the_backend_field_names() {
        let mut form = DriverApplicationForm::new();
        fill_personal(&mut form);
        fill_vehicle(&mut form);
        form.application.emergency_contact_number = "+639998887777".to_string();
        form.application.data_privacy_consent = true;

        let fields = form.text_fields();
        let keys: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();

        assert!(keys.contains(&"dateOfBirth"));
        assert!(keys.contains(&"confirmPassword"));
        assert!(keys.contains(&"emergencyContactNumber"));
        assert!(keys.contains(&"vehicleMaker"));
        assert!(keys.contains(&"vehicleModel"));
        assert!(keys.contains(&"vehicleColor"));
        assert!(keys.contains(&"vehicleOwnership"));

        // Consent flags are always present, even when false.
        assert!(fields.contains(&("dataPrivacyConsent", "true".to_string())));
        assert!(fields.contains(&("backgroundCheckConsent", "false".to_string())));

        // Empty optional fields are skipped entirely.
        assert!(!keys.contains(&"middleName"));
        assert!(!keys.contains(&"tin"));
    }

    #[test]
    fn happy_path_walks_every_step() {
        let mut form = form_at_personal();
        fill_personal(&mut form);
        assert!(form.next());

        form.application.barangay = "Mandalagan".to_string();
        assert!(form.next());

        form.application.license_level = "Professional".to_string();
        form.application.license_number = "N01-23-456789".to_string();
        form.application.license_expiry_date = "2027-12-31".to_string();
        assert!(form.next());

        form.application.emergency_contact_name = "Maria Dela Cruz".to_string();
        form.application.emergency_contact_number = "+639998887777".to_string();
        form.application.emergency_contact_relationship = "Spouse".to_string();
        assert!(form.next());

        fill_vehicle(&mut form);
        assert!(form.next());

        assert!(form.next());
        assert_eq!(form.step, Step::Confirm);
        assert!(!form.next());
    }

    #[test]
    fn step_index_is_one_based() {
        assert_eq!(Step::ServiceInfo.index(), 1);
        assert_eq!(Step::Confirm.index(), 8);
    }
}
