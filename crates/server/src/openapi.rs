use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub uid: String,
    pub email: Option<String>,
    pub username: String,
    /// admin | student (defaults to student)
    pub role: Option<String>,
    pub school: Option<String>,
    pub avatar: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub school: Option<String>,
    pub avatar: Option<String>,
}

#[derive(ToSchema)]
pub struct NewMentorRequest {
    pub full_name: String,
    pub position: Option<String>,
    pub workplace: Option<String>,
    pub specialty: Option<String>,
    pub contact_url: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(ToSchema)]
pub struct NewOpportunityRequest {
    pub title: String,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub image_url: Option<String>,
    /// scholarship | contest | event
    pub kind: String,
    /// ISO date, e.g. 2026-12-31
    pub deadline: Option<String>,
}

#[derive(ToSchema)]
pub struct NewArticleRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

#[derive(ToSchema)]
pub struct BookmarkRequest {
    pub user_uid: String,
    pub opportunity_id: String,
}

#[derive(ToSchema)]
pub struct AskRequest {
    pub question: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::users::update_avatar,
        crate::routes::mentors::create_mentor,
        crate::routes::mentors::list_mentors,
        crate::routes::mentors::search_mentors,
        crate::routes::mentors::get_mentor,
        crate::routes::mentors::update_mentor,
        crate::routes::mentors::delete_mentor,
        crate::routes::opportunities::create_opportunity,
        crate::routes::opportunities::create_many,
        crate::routes::opportunities::list_opportunities,
        crate::routes::opportunities::get_opportunity,
        crate::routes::opportunities::list_by_kind,
        crate::routes::opportunities::update_opportunity,
        crate::routes::opportunities::delete_opportunity,
        crate::routes::articles::create_article,
        crate::routes::articles::bulk_create,
        crate::routes::articles::list_articles,
        crate::routes::articles::get_article,
        crate::routes::articles::update_article,
        crate::routes::articles::delete_article,
        crate::routes::bookmarks::add_bookmark,
        crate::routes::bookmarks::remove_bookmark,
        crate::routes::bookmarks::check_bookmark,
        crate::routes::bookmarks::list_for_user,
        crate::routes::chatbot::ask,
    ),
    components(
        schemas(
            RegisterRequest,
            UpdateUserRequest,
            NewMentorRequest,
            NewOpportunityRequest,
            NewArticleRequest,
            BookmarkRequest,
            AskRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "user"),
        (name = "mentor"),
        (name = "opportunity"),
        (name = "article"),
        (name = "bookmark"),
        (name = "chatbot")
    )
)]
pub struct ApiDoc;
