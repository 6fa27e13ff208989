use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponseDoc { pub message: String, pub token: String, pub username: String, pub expires_at: i64 }

#[derive(ToSchema)]
pub struct TopicDoc { pub id: i32, pub topic: String }

/// Problem as returned by the API; `explanation` only on single reads.
#[derive(ToSchema)]
pub struct ProblemDoc {
    pub id: i32,
    pub level: String,
    pub content: String,
    pub problem_type: String,
    pub answer: String,
    pub first_option: Option<String>,
    pub second_option: Option<String>,
    pub third_option: Option<String>,
    pub fourth_option: Option<String>,
    /// Topic names joined by ", "
    pub topic: String,
    pub explanation: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(ToSchema)]
pub struct ProblemInputDoc {
    pub level: String,
    pub content: String,
    /// "Pilihan Ganda" or "Isian Singkat"
    pub problem_type: String,
    pub answer: String,
    pub first_option: Option<String>,
    pub second_option: Option<String>,
    pub third_option: Option<String>,
    pub fourth_option: Option<String>,
    pub topics: Vec<String>,
    pub explanation: String,
}

#[derive(ToSchema)]
pub struct CollectionDoc {
    pub problems: Vec<ProblemDoc>,
    pub topics: Vec<String>,
    pub level: String,
    pub topic: String,
    pub page: u64,
}

#[derive(ToSchema)]
pub struct PacketDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_show: bool,
    pub time_limit: i32,
    pub maximum_score: i32,
    pub mc_total_problem: i32,
    pub sa_total_problem: i32,
    pub mc_correct_scoring: i32,
    pub mc_wrong_scoring: i32,
    pub sa_correct_scoring: i32,
    pub sa_wrong_scoring: i32,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
    /// Present on single reads and write responses
    pub problems: Option<Vec<ProblemDoc>>,
}

#[derive(ToSchema)]
pub struct PacketProblemDoc { pub id: i32, pub problem_type: String }

#[derive(ToSchema)]
pub struct PacketInputDoc {
    pub name: String,
    pub description: String,
    pub is_show: Option<bool>,
    pub time_limit: i32,
    pub mc_correct_scoring: i32,
    pub mc_wrong_scoring: i32,
    pub sa_correct_scoring: i32,
    pub sa_wrong_scoring: i32,
    pub problems: Vec<PacketProblemDoc>,
}

/// With `is_show` set only visibility changes.
#[derive(ToSchema)]
pub struct PacketUpdateDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_show: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::problems::list,
        crate::routes::problems::create,
        crate::routes::problems::topics,
        crate::routes::problems::get,
        crate::routes::problems::update,
        crate::routes::problems::delete,
        crate::routes::collection::browse,
        crate::routes::packets::list,
        crate::routes::packets::list_public,
        crate::routes::packets::create,
        crate::routes::packets::get,
        crate::routes::packets::update,
        crate::routes::packets::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponseDoc,
            TopicDoc,
            ProblemDoc,
            ProblemInputDoc,
            CollectionDoc,
            PacketDoc,
            PacketProblemDoc,
            PacketInputDoc,
            PacketUpdateDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "problem"),
        (name = "collection"),
        (name = "try_out")
    )
)]
pub struct ApiDoc;
