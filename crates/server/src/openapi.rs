use utoipa::openapi::path::{OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{
    ContentBuilder, KnownFormat, ObjectBuilder, PathItemType, Ref, RefOr, Required, ResponseBuilder,
    Schema, SchemaFormat, SchemaType,
};
use utoipa::{Modify, OpenApi, ToSchema};

use service::auth::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use service::services::{
    BuildingModel, CustomerModel, LaundryStoreModel, OrderModel, PaymentModel, StaffModel,
    StaffTripModel, TimeScheduleModel, TransactionModel, WalletModel,
};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// `(route slug, input schema)` for every CRUD resource.
pub const RESOURCES: &[(&str, &str)] = &[
    ("customer", "CustomerModel"),
    ("laundry-store", "LaundryStoreModel"),
    ("staff-trip", "StaffTripModel"),
    ("order", "OrderModel"),
    ("transaction", "TransactionModel"),
    ("payment", "PaymentModel"),
    ("wallet", "WalletModel"),
    ("building", "BuildingModel"),
    ("staff", "StaffModel"),
    ("time-schedule", "TimeScheduleModel"),
];

#[derive(OpenApi)]
#[openapi(
    info(title = "Laundry backend", version = "v1"),
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterInput,
            LoginInput,
            AuthUser,
            AuthSession,
            BuildingModel,
            CustomerModel,
            LaundryStoreModel,
            OrderModel,
            PaymentModel,
            StaffModel,
            StaffTripModel,
            TimeScheduleModel,
            TransactionModel,
            WalletModel,
        )
    ),
    modifiers(&CrudPaths, &BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

/// Documents the generic CRUD routes mounted under `/api/v1/<slug>`.
struct CrudPaths;

fn json_body(schema: &str) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content("application/json", ContentBuilder::new().schema(Ref::from_schema_name(schema)).build())
        .required(Some(Required::True))
        .build()
}

fn op(tag: &str, summary: &str) -> OperationBuilder {
    OperationBuilder::new()
        .tag(tag)
        .summary(Some(summary))
        .securities(Some([SecurityRequirement::new("bearer_auth", Vec::<String>::new())]))
        .response("401", ResponseBuilder::new().description("Unauthorized").build())
        .response("403", ResponseBuilder::new().description("Forbidden").build())
}

fn id_param() -> utoipa::openapi::path::Parameter {
    let uuid = ObjectBuilder::new()
        .schema_type(SchemaType::String)
        .format(Some(SchemaFormat::KnownFormat(KnownFormat::Uuid)))
        .build();
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(RefOr::T(Schema::Object(uuid))))
        .build()
}

fn query_param(name: &str, ty: SchemaType) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .schema(Some(RefOr::T(Schema::Object(ObjectBuilder::new().schema_type(ty).build()))))
        .build()
}

impl Modify for CrudPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for (slug, schema) in RESOURCES {
            let base = format!("/api/v1/{slug}");
            let ok = || ResponseBuilder::new().description("OK").build();
            let missing = || ResponseBuilder::new().description("Not Found").build();

            let collection = PathItemBuilder::new()
                .operation(PathItemType::Get, op(slug, "List all").response("200", ok()).build())
                .operation(
                    PathItemType::Post,
                    op(slug, "Create")
                        .request_body(Some(json_body(schema)))
                        .response("201", ResponseBuilder::new().description("Created").build())
                        .response("400", ResponseBuilder::new().description("Bad Request").build())
                        .build(),
                )
                .build();

            let page = PathItemBuilder::new()
                .operation(
                    PathItemType::Get,
                    op(slug, "One page")
                        .parameter(query_param("page", SchemaType::Integer))
                        .parameter(query_param("size", SchemaType::Integer))
                        .parameter(query_param("order_by", SchemaType::String))
                        .response("200", ok())
                        .build(),
                )
                .build();

            let item = PathItemBuilder::new()
                .operation(
                    PathItemType::Get,
                    op(slug, "Get by id").parameter(id_param()).response("200", ok()).response("404", missing()).build(),
                )
                .operation(
                    PathItemType::Put,
                    op(slug, "Update")
                        .parameter(id_param())
                        .request_body(Some(json_body(schema)))
                        .response("200", ok())
                        .response("404", missing())
                        .build(),
                )
                .operation(
                    PathItemType::Delete,
                    op(slug, "Delete").parameter(id_param()).response("200", ok()).response("404", missing()).build(),
                )
                .build();

            openapi.paths.paths.insert(base.clone(), collection);
            openapi.paths.paths.insert(format!("{base}/paginated"), page);
            openapi.paths.paths.insert(format!("{base}/{{id}}"), item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_routes_documented() {
        let doc = ApiDoc::openapi();
        for (slug, _) in RESOURCES {
            assert!(doc.paths.paths.contains_key(&format!("/api/v1/{slug}/{{id}}")), "{slug}");
        }
        assert!(doc.paths.paths.contains_key("/api/v1/auth/login"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("OrderModel"));
    }
}
