use crate::api::{RegisterRequest, SubmitReliefRequest, UpdateReliefRequest};
use crate::error::FieldError;

pub const WARD_MIN: u32 = 1;
pub const WARD_MAX: u32 = 35;

pub const LOCATION_MIN: usize = 10;
pub const LOCATION_MAX: usize = 500;
pub const DAMAGE_MIN: usize = 20;
pub const DAMAGE_MAX: usize = 2000;
pub const ASSIGNED_TEAM_MAX: usize = 100;
pub const ADMIN_REMARK_MAX: usize = 500;

pub const PASSWORD_MIN: usize = 6;
pub const FULL_NAME_MIN: usize = 2;
pub const FULL_NAME_MAX: usize = 100;

/// Validate a citizen submission. Classification enums are already closed
/// types at the deserialization boundary; this covers the numeric and
/// length constraints.
pub fn validate_new_request(req: &SubmitReliefRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if req.ward_number < WARD_MIN || req.ward_number > WARD_MAX {
        errors.push(FieldError::new(
            "ward_number",
            "Ward number must be between 1 and 35",
        ));
    }

    let location_len = req.location_details.chars().count();
    if location_len < LOCATION_MIN {
        errors.push(FieldError::new(
            "location_details",
            "Location details must be at least 10 characters",
        ));
    } else if location_len > LOCATION_MAX {
        errors.push(FieldError::new(
            "location_details",
            "Location details must not exceed 500 characters",
        ));
    }

    let damage_len = req.damage_description.chars().count();
    if damage_len < DAMAGE_MIN {
        errors.push(FieldError::new(
            "damage_description",
            "Damage description must be at least 20 characters",
        ));
    } else if damage_len > DAMAGE_MAX {
        errors.push(FieldError::new(
            "damage_description",
            "Damage description must not exceed 2000 characters",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate an admin patch. Only lengths need checking; the status value is
/// a closed type.
pub fn validate_update(patch: &UpdateReliefRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Some(team) = &patch.assigned_team {
        if team.chars().count() > ASSIGNED_TEAM_MAX {
            errors.push(FieldError::new(
                "assigned_team",
                "Assigned team must not exceed 100 characters",
            ));
        }
    }

    if let Some(remark) = &patch.admin_remark {
        if remark.chars().count() > ADMIN_REMARK_MAX {
            errors.push(FieldError::new(
                "admin_remark",
                "Admin remark must not exceed 500 characters",
            ));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !is_plausible_email(&req.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }

    if req.password.chars().count() < PASSWORD_MIN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }

    let name_len = req.full_name.chars().count();
    if name_len < FULL_NAME_MIN {
        errors.push(FieldError::new(
            "full_name",
            "Full name must be at least 2 characters",
        ));
    } else if name_len > FULL_NAME_MAX {
        errors.push(FieldError::new(
            "full_name",
            "Full name must not exceed 100 characters",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

// Deliverability is the mail server's problem; this only rejects obvious
// non-addresses.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisasterType, Priority, ReliefType};

    fn valid_submission() -> SubmitReliefRequest {
        SubmitReliefRequest {
            disaster_type: DisasterType::Flood,
            ward_number: 12,
            location_details: "Ward 12, behind the old bus park".into(),
            damage_description: "River overflowed into the ground floor, two families displaced".into(),
            relief_type: ReliefType::Shelter,
            priority: Priority::High,
        }
    }

    fn field_names(errors: Vec<FieldError>) -> Vec<&'static str> {
        errors.into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn accepts_valid_submission() {
        assert!(validate_new_request(&valid_submission()).is_ok());
    }

    #[test]
    fn ward_number_bounds() {
        let mut req = valid_submission();

        req.ward_number = 0;
        assert_eq!(field_names(validate_new_request(&req).unwrap_err()), ["ward_number"]);

        req.ward_number = 36;
        assert_eq!(field_names(validate_new_request(&req).unwrap_err()), ["ward_number"]);

        req.ward_number = 1;
        assert!(validate_new_request(&req).is_ok());

        req.ward_number = 35;
        assert!(validate_new_request(&req).is_ok());
    }

    #[test]
    fn location_details_length_bounds() {
        let mut req = valid_submission();

        req.location_details = "x".repeat(9);
        assert_eq!(field_names(validate_new_request(&req).unwrap_err()), ["location_details"]);

        req.location_details = "x".repeat(10);
        assert!(validate_new_request(&req).is_ok());

        req.location_details = "x".repeat(500);
        assert!(validate_new_request(&req).is_ok());

        req.location_details = "x".repeat(501);
        assert_eq!(field_names(validate_new_request(&req).unwrap_err()), ["location_details"]);
    }

    #[test]
    fn damage_description_length_bounds() {
        let mut req = valid_submission();

        req.damage_description = "x".repeat(19);
        assert_eq!(field_names(validate_new_request(&req).unwrap_err()), ["damage_description"]);

        req.damage_description = "x".repeat(20);
        assert!(validate_new_request(&req).is_ok());

        req.damage_description = "x".repeat(2000);
        assert!(validate_new_request(&req).is_ok());

        req.damage_description = "x".repeat(2001);
        assert_eq!(field_names(validate_new_request(&req).unwrap_err()), ["damage_description"]);
    }

    #[test]
    fn multiple_violations_reported_together() {
        let mut req = valid_submission();
        req.ward_number = 99;
        req.location_details = "short".into();
        let fields = field_names(validate_new_request(&req).unwrap_err());
        assert_eq!(fields, ["ward_number", "location_details"]);
    }

    #[test]
    fn update_patch_length_bounds() {
        let empty = UpdateReliefRequest {
            status: None,
            assigned_team: None,
            admin_remark: None,
        };
        assert!(validate_update(&empty).is_ok());

        let at_limit = UpdateReliefRequest {
            status: None,
            assigned_team: Some("t".repeat(100)),
            admin_remark: Some("r".repeat(500)),
        };
        assert!(validate_update(&at_limit).is_ok());

        let over = UpdateReliefRequest {
            status: None,
            assigned_team: Some("t".repeat(101)),
            admin_remark: Some("r".repeat(501)),
        };
        let fields = field_names(validate_update(&over).unwrap_err());
        assert_eq!(fields, ["assigned_team", "admin_remark"]);
    }

    #[test]
    fn register_bounds() {
        let ok = RegisterRequest {
            email: "asha@example.com".into(),
            password: "secret".into(),
            full_name: "Asha Tamang".into(),
        };
        assert!(validate_register(&ok).is_ok());

        let bad = RegisterRequest {
            email: "not-an-email".into(),
            password: "pw".into(),
            full_name: "A".into(),
        };
        let fields = field_names(validate_register(&bad).unwrap_err());
        assert_eq!(fields, ["email", "password", "full_name"]);

        let long_name = RegisterRequest {
            email: "asha@example.com".into(),
            password: "secret".into(),
            full_name: "x".repeat(101),
        };
        let fields = field_names(validate_register(&long_name).unwrap_err());
        assert_eq!(fields, ["full_name"]);
    }
}
