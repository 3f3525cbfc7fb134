/// Registration command, prior to validation.
///
/// Required fields stay `Option` so the service can report exactly which
/// one is missing, in order, instead of failing at deserialization.
#[derive(Debug, Clone, Default)]
pub struct RegisterAccountDto {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<Option<String>>>,
    pub status: Option<String>,
}
