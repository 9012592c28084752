//! Typed session payload on top of `tower-sessions`.
//!
//! Everything the application keeps between requests lives in one
//! [`SessionData`] value stored under [`SESSION_DATA_KEY`]. Handlers use the
//! [`AppSession`] extractor, whose accessors load, change, and save that value.
//!
//! Notices (`flash`, `warning`, `error`) are one-shot: the next rendered page
//! takes and clears them.

use std::collections::BTreeMap;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use bookings_core::booking::ReservationDraft;
use bookings_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::views::{Notices, PageContext};

/// Key for the whole typed payload in the session store.
pub const SESSION_DATA_KEY: &str = "bookings";

/// Room id -> (day -> block restriction id), as rendered by the last calendar view.
pub type BlockMaps = BTreeMap<DbId, BTreeMap<NaiveDate, DbId>>;

/// Session data stored in the session store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// Authenticated administrator, if any.
    pub user_id: Option<DbId>,
    /// In-progress reservation.
    pub draft: Option<ReservationDraft>,
    pub flash: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub block_maps: BlockMaps,
}

impl SessionData {
    fn take_notices(&mut self) -> Notices {
        Notices {
            flash: self.flash.take(),
            warning: self.warning.take(),
            error: self.error.take(),
        }
    }
}

/// Extractor giving typed access to the request's session.
#[derive(Debug, Clone)]
pub struct AppSession {
    session: Session,
}

impl<S> FromRequestParts<S> for AppSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::InternalError(msg.to_string()))?;
        Ok(Self { session })
    }
}

impl AppSession {
    pub async fn load(&self) -> AppResult<SessionData> {
        Ok(self
            .session
            .get::<SessionData>(SESSION_DATA_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn save(&self, data: &SessionData) -> AppResult<()> {
        self.session.insert(SESSION_DATA_KEY, data).await?;
        Ok(())
    }

    async fn update<T>(&self, change: impl FnOnce(&mut SessionData) -> T) -> AppResult<T> {
        let mut data = self.load().await?;
        let out = change(&mut data);
        self.save(&data).await?;
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Notices
    // -----------------------------------------------------------------------

    pub async fn flash(&self, message: impl Into<String>) -> AppResult<()> {
        let message = message.into();
        self.update(|d| d.flash = Some(message)).await
    }

    pub async fn warning(&self, message: impl Into<String>) -> AppResult<()> {
        let message = message.into();
        self.update(|d| d.warning = Some(message)).await
    }

    pub async fn error(&self, message: impl Into<String>) -> AppResult<()> {
        let message = message.into();
        self.update(|d| d.error = Some(message)).await
    }

    /// Take pending notices and report the login state for a page render.
    pub async fn page_context(&self) -> AppResult<PageContext> {
        self.update(|d| PageContext {
            notices: d.take_notices(),
            is_authenticated: d.user_id.is_some(),
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Reservation draft
    // -----------------------------------------------------------------------

    pub async fn draft(&self) -> AppResult<Option<ReservationDraft>> {
        Ok(self.load().await?.draft)
    }

    pub async fn set_draft(&self, draft: ReservationDraft) -> AppResult<()> {
        self.update(|d| d.draft = Some(draft)).await
    }

    pub async fn take_draft(&self) -> AppResult<Option<ReservationDraft>> {
        self.update(|d| d.draft.take()).await
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    pub async fn user_id(&self) -> AppResult<Option<DbId>> {
        Ok(self.load().await?.user_id)
    }

    /// Record a successful login under a fresh session id.
    pub async fn log_in(&self, user_id: DbId) -> AppResult<()> {
        self.session.cycle_id().await?;
        self.update(|d| d.user_id = Some(user_id)).await
    }

    /// Destroy the session entirely.
    pub async fn log_out(&self) -> AppResult<()> {
        self.session.flush().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Calendar
    // -----------------------------------------------------------------------

    pub async fn set_block_maps(&self, maps: BlockMaps) -> AppResult<()> {
        self.update(|d| d.block_maps = maps).await
    }

    pub async fn block_maps(&self) -> AppResult<BlockMaps> {
        Ok(self.load().await?.block_maps)
    }
}
