//! Matrix client creation.
//!
//! The first start logs in with the account password and stores the session.
//! Later starts restore the stored session so the bot keeps a single device.

use log::{debug, info};
use matrix_sdk::{Client, ruma::OwnedUserId};

use crate::matrix::{UserCredentials, session::MatrixSession};

/// Returns a logged-in client, restoring the stored session when there is one.
pub async fn setup_client(
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
) -> Result<Client, anyhow::Error> {
    match matrix_session.user_session().await {
        Some(user_session) => {
            info!("restoring matrix session from disk");
            let client = build_client(user_credentials, matrix_session).await?;
            client.restore_session(user_session).await?;
            info!("matrix session restored");
            Ok(client)
        }
        None => create_session(user_credentials, matrix_session).await,
    }
}

async fn build_client(
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
) -> Result<Client, anyhow::Error> {
    let user_id: OwnedUserId = user_credentials.user_id.clone().try_into()?;
    let client = Client::builder()
        .server_name(user_id.server_name())
        .sqlite_store(matrix_session.store_path(), None)
        .build()
        .await?;

    debug!("matrix client created for {}", user_id);
    Ok(client)
}

async fn create_session(
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
) -> Result<Client, anyhow::Error> {
    info!("logging in as {}", user_credentials.user_id);

    let client = build_client(user_credentials, matrix_session).await?;
    let user_id: OwnedUserId = user_credentials.user_id.clone().try_into()?;

    client
        .matrix_auth()
        .login_username(user_id, &user_credentials.password)
        .initial_device_display_name("sparky bot")
        .send()
        .await?;

    let user_session = client
        .matrix_auth()
        .session()
        .ok_or_else(|| anyhow::anyhow!("no session after login"))?;
    matrix_session.persist_user_session(user_session).await?;

    info!("matrix login complete");
    Ok(client)
}
