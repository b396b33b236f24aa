//! Sign-up, sign-in and sign-out through the managed auth service, plus the
//! profile rows created alongside new accounts.

use std::sync::Arc;

use nutri_auth::{AuthError, AuthProvider, AuthResponse, AuthUser};
use nutri_database::{NewNutritionist, NewUserProfile, NutritionistRepo, UserRepo};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::types::{
    CurrentUser, NutritionistRegistration, NutritionistSignupRequest, SignupRequest,
    SignupResponse, UserError, UserResult,
};

pub const PENDING_APPROVAL_MESSAGE: &str =
    "Registration received. Your account is awaiting administrator approval.";

#[derive(Clone)]
pub struct AccountService {
    auth: Arc<dyn AuthProvider>,
    users: Arc<dyn UserRepo>,
    nutritionists: Arc<dyn NutritionistRepo>,
}

impl AccountService {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        users: Arc<dyn UserRepo>,
        nutritionists: Arc<dyn NutritionistRepo>,
    ) -> Self {
        Self {
            auth,
            users,
            nutritionists,
        }
    }

    /// Create the auth account, then the `usuarios` row keyed by its id
    pub async fn sign_up(&self, request: SignupRequest) -> UserResult<SignupResponse> {
        let profile = request.user_data;
        let metadata = json!({
            "full_name": profile.nome,
            "cpf": profile.cpf,
            "data_nascimento": profile.data_nascimento,
            "telefone": profile.telefone,
            "tipo": "usuario",
        });

        let auth = self
            .auth
            .sign_up(&request.email, &request.password, metadata)
            .await
            .map_err(registration_error)?;
        let account = auth
            .user
            .ok_or_else(|| UserError::Registration("Sign-up returned no user".to_string()))?;

        let row = NewUserProfile {
            id: account.id.clone(),
            name: profile.nome,
            email: request.email,
            cpf: profile.cpf,
            birth_date: profile.data_nascimento,
            phone: profile.telefone,
            height: profile.altura,
            weight: profile.peso,
            gender: profile.genero,
            objective: profile.objetivo,
        };
        let user = self.users.create(&row).await.map_err(|err| {
            warn!(user_id = %account.id, error = %err, "profile insert failed after sign-up");
            UserError::Registration(err.to_string())
        })?;

        info!(user_id = %user.id, "user signed up");
        Ok(SignupResponse {
            user,
            session: auth.session,
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> UserResult<AuthResponse> {
        match self.auth.sign_in_with_password(email, password).await {
            Ok(response) if response.session.is_some() => Ok(response),
            Ok(_) => Err(UserError::InvalidCredentials),
            Err(err) => {
                warn!(error = %err, "sign-in refused");
                Err(UserError::InvalidCredentials)
            }
        }
    }

    /// Revoke the session behind `token`. A missing, expired or already
    /// revoked token leaves nothing to revoke and still signs out.
    pub async fn sign_out(&self, token: Option<&str>) -> UserResult<()> {
        let Some(token) = token else {
            return Ok(());
        };
        match self.auth.sign_out(token).await {
            Ok(()) => Ok(()),
            Err(AuthError::InvalidToken) => {
                debug!("sign-out with an invalid token");
                Ok(())
            }
            Err(AuthError::Rejected { status, message }) if matches!(status, 401 | 403) => {
                debug!(status, %message, "sign-out with a stale session");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn current_user(&self, account: AuthUser) -> UserResult<CurrentUser> {
        let profile = self.users.find_by_id(&account.id).await?;
        Ok(CurrentUser { account, profile })
    }

    /// Public nutritionist registration. The row starts inactive until an
    /// administrator approves it.
    pub async fn register_nutritionist(
        &self,
        request: NutritionistSignupRequest,
    ) -> UserResult<NutritionistRegistration> {
        let metadata = json!({
            "full_name": request.nome,
            "telefone": request.telefone,
            "tipo": "nutricionista",
        });

        let auth = self
            .auth
            .sign_up(&request.email, &request.password, metadata)
            .await
            .map_err(registration_error)?;
        let account = auth
            .user
            .ok_or_else(|| UserError::Registration("Sign-up returned no user".to_string()))?;

        let row = NewNutritionist {
            user_id: account.id.clone(),
            name: request.nome,
            crn: request.crn,
            phone: request.telefone,
            specialty: request.especialidade,
            active: false,
        };
        let nutritionist = self
            .nutritionists
            .create(&row)
            .await
            .map_err(|err| UserError::Registration(err.to_string()))?;

        Ok(NutritionistRegistration {
            message: PENDING_APPROVAL_MESSAGE.to_string(),
            nutricionista: nutritionist,
        })
    }
}

fn registration_error(err: AuthError) -> UserError {
    warn!(error = %err, "sign-up refused");
    UserError::Registration(err.to_string())
}
