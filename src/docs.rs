// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Garage ---
        handlers::garage::get_my_garage,
        handlers::garage::update_my_garage,

        // --- Garage Users ---
        handlers::garage_users::list,
        handlers::garage_users::create,
        handlers::garage_users::update,
        handlers::garage_users::remove,

        // --- Vehicles ---
        handlers::vehicles::list_admin,
        handlers::vehicles::get,
        handlers::vehicles::create,
        handlers::vehicles::update,
        handlers::vehicles::remove,
        handlers::vehicles::upload_images,
        handlers::vehicles::list_images,
        handlers::vehicles::set_cover,
        handlers::vehicles::remove_image,

        // --- Leads ---
        handlers::leads::list,

        // --- Public ---
        handlers::public::get_garage,
        handlers::public::list_vehicles,
        handlers::public::get_vehicle,
        handlers::public::create_lead,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginPayload,
            models::auth::LoginResponse,
            models::auth::UserSummary,
            models::auth::ActiveGarage,
            models::auth::AuthUser,
            models::auth::GarageClaim,

            // --- Garage ---
            models::garage::Garage,
            models::garage::GaragePublic,
            models::garage::UpdateGaragePayload,

            // --- Membership ---
            models::membership::GarageRole,
            models::membership::GarageMember,
            models::membership::CreateGarageUserPayload,
            models::membership::UpdateGarageUserPayload,

            // --- Vehicles ---
            models::vehicle::Fuel,
            models::vehicle::Gearbox,
            models::vehicle::VehicleStatus,
            models::vehicle::Vehicle,
            models::vehicle::VehicleImage,
            models::vehicle::VehicleDetail,
            models::vehicle::VehicleListItem,
            models::vehicle::CreateVehiclePayload,
            models::vehicle::UpdateVehiclePayload,
            models::vehicle::PublicVehicleCard,
            models::vehicle::PublicImage,
            models::vehicle::PublicGarageContact,
            models::vehicle::PublicVehicleDetail,

            // --- Leads ---
            models::lead::LeadStatus,
            models::lead::LeadSource,
            models::lead::CreateLeadPayload,
            models::lead::LeadCreated,
            models::lead::LeadVehicleRef,
            models::lead::LeadListItem,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Garage", description = "Perfil da garagem do usuário autenticado"),
        (name = "Garage Users", description = "Membros e papéis da garagem"),
        (name = "Vehicles", description = "Estoque de veículos e galeria de imagens"),
        (name = "Leads", description = "Interessados captados pela vitrine"),
        (name = "Public", description = "Vitrine pública (sem autenticação)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
