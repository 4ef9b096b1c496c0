//! Demo snapshot of pending requests
//!
//! Stand-in for the submissions that normally arrive from the public
//! portal. Loaded at startup; the queues are process-local and reset on
//! restart.

use crate::models::{IntegrationRequest, RegistrationRequest, Role};

/// Sample account registrations awaiting review
pub fn sample_registrations() -> Vec<RegistrationRequest> {
    vec![
        RegistrationRequest {
            first_name: "Juan Carlos".to_string(),
            first_last_name: "Pérez".to_string(),
            second_last_name: Some("Gómez".to_string()),
            email: "juan.perez@email.com".to_string(),
            phone: "3001234567".to_string(),
            role: Role::Researcher,
            institution: Some("Universidad del Valle".to_string()),
        },
        RegistrationRequest {
            first_name: "María Fernanda".to_string(),
            first_last_name: "López".to_string(),
            second_last_name: Some("Martínez".to_string()),
            email: "maria.lopez@email.com".to_string(),
            phone: "3009876543".to_string(),
            role: Role::StationAdmin,
            institution: Some("Universidad Nacional".to_string()),
        },
    ]
}

/// Sample institution integrations awaiting review
pub fn sample_integrations() -> Vec<IntegrationRequest> {
    vec![
        IntegrationRequest {
            institution: "Universidad del Valle".to_string(),
            logo: "/images/univalle_logo.png".to_string(),
            primary_color: "#84cc16".to_string(),
            secondary_color: "#ffffff".to_string(),
            address: "Calle 13 #23-45, Santiago de Cali".to_string(),
        },
        IntegrationRequest {
            institution: "Universidad Nacional".to_string(),
            logo: "/images/unal_logo.png".to_string(),
            primary_color: "#fbbf24".to_string(),
            secondary_color: "#f8fafc".to_string(),
            address: "Carrera 30 #10-70, Bogotá".to_string(),
        },
    ]
}
