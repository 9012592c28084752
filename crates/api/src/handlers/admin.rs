//! Handlers for the `/admin` pages.
//!
//! Every handler takes [`AdminUser`], so anonymous requests never reach them.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Utc;
use serde::Deserialize;
use bookings_core::calendar::{blocks_to_add, blocks_to_remove, CalendarMonth, RoomOccupancy};
use bookings_core::error::CoreError;
use bookings_core::forms::{FormErrors, GuestDetails};
use bookings_core::types::DbId;
use bookings_db::models::reservation::Reservation;
use bookings_db::models::status::ProcessedStatus;
use bookings_db::repositories::{ReservationRepo, RoomRepo, RoomRestrictionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::session::{AppSession, BlockMaps};
use crate::state::AppState;
use crate::views::{
    self, CalendarPage, CalendarRoom, DashboardPage, ReservationListPage, ReservationPage,
};

pub const STALE_BLOCKS: &str = "Some blocks had already been removed";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// The list an admin action was started from, and so returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    New,
    All,
    Calendar,
}

impl ListSource {
    pub fn parse(segment: &str) -> AppResult<Self> {
        match segment {
            "new" => Ok(Self::New),
            "all" => Ok(Self::All),
            "cal" => Ok(Self::Calendar),
            other => Err(AppError::BadRequest(format!("Unknown reservation list '{other}'"))),
        }
    }

    pub fn segment(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::All => "all",
            Self::Calendar => "cal",
        }
    }

    /// Where to send the admin after an action.
    pub fn return_path(self, month: Option<CalendarMonth>) -> String {
        match (self, month) {
            (Self::New, _) => "/admin/reservations-new".into(),
            (Self::All, _) => "/admin/reservations-all".into(),
            (Self::Calendar, Some(m)) => calendar_path(m),
            (Self::Calendar, None) => "/admin/reservations-calendar".into(),
        }
    }
}

fn calendar_path(month: CalendarMonth) -> String {
    format!(
        "/admin/reservations-calendar?y={}&m={}",
        month.year(),
        month.month()
    )
}

/// Optional `y`/`m` pair carried through forms and links from the calendar.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReturnMonth {
    pub y: String,
    pub m: String,
}

impl ReturnMonth {
    pub fn month(&self) -> Option<CalendarMonth> {
        let year = self.y.trim().parse().ok()?;
        let month = self.m.trim().parse().ok()?;
        CalendarMonth::new(year, month).ok()
    }
}

/// Posted by the reservation detail form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReservationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub y: String,
    pub m: String,
}

impl ReservationForm {
    fn into_parts(self) -> (GuestDetails, ReturnMonth) {
        (
            GuestDetails {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                phone: self.phone,
            },
            ReturnMonth {
                y: self.y,
                m: self.m,
            },
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub y: Option<i32>,
    pub m: Option<u32>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Reservation",
        id,
    })
}

async fn find_reservation(state: &AppState, id: DbId) -> AppResult<Reservation> {
    ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /admin/dashboard
pub async fn dashboard(_admin: AdminUser, session: AppSession) -> AppResult<Html<String>> {
    Ok(views::render(&session.page_context().await?, &DashboardPage))
}

/// GET /admin/reservations-new
pub async fn list_new(
    _admin: AdminUser,
    State(state): State<AppState>,
    session: AppSession,
) -> AppResult<Html<String>> {
    let page = ReservationListPage {
        heading: "New Reservations",
        src: ListSource::New.segment(),
        reservations: ReservationRepo::list_new(&state.pool).await?,
    };
    Ok(views::render(&session.page_context().await?, &page))
}

/// GET /admin/reservations-all
pub async fn list_all(
    _admin: AdminUser,
    State(state): State<AppState>,
    session: AppSession,
) -> AppResult<Html<String>> {
    let page = ReservationListPage {
        heading: "All Reservations",
        src: ListSource::All.segment(),
        reservations: ReservationRepo::list_all(&state.pool).await?,
    };
    Ok(views::render(&session.page_context().await?, &page))
}

/// GET /admin/reservations/{src}/{id}
pub async fn show(
    _admin: AdminUser,
    State(state): State<AppState>,
    session: AppSession,
    Path((src, id)): Path<(String, DbId)>,
    Query(ret): Query<ReturnMonth>,
) -> AppResult<Html<String>> {
    let src = ListSource::parse(&src)?;
    let reservation = find_reservation(&state, id).await?;
    let month = ret.month();
    let page = ReservationPage {
        guest: reservation.guest(),
        reservation,
        errors: FormErrors::default(),
        src: src.segment(),
        month,
        back: src.return_path(month),
    };
    Ok(views::render(&session.page_context().await?, &page))
}

/// POST /admin/reservations/{src}/{id}
///
/// Updates guest fields only, validated like the public form.
pub async fn update(
    admin: AdminUser,
    State(state): State<AppState>,
    session: AppSession,
    Path((src, id)): Path<(String, DbId)>,
    Form(form): Form<ReservationForm>,
) -> AppResult<Response> {
    let src = ListSource::parse(&src)?;
    let (guest, ret) = form.into_parts();
    let month = ret.month();

    let errors = guest.check();
    if !errors.is_empty() {
        let reservation = find_reservation(&state, id).await?;
        let page = ReservationPage {
            reservation,
            guest,
            errors,
            src: src.segment(),
            month,
            back: src.return_path(month),
        };
        return Ok(views::render(&session.page_context().await?, &page).into_response());
    }

    if !ReservationRepo::update_guest(&state.pool, id, &guest).await? {
        return Err(not_found(id));
    }
    tracing::info!(reservation_id = id, user_id = admin.user_id, "Reservation updated");
    session.flash("Changes saved").await?;
    Ok(Redirect::to(&src.return_path(month)).into_response())
}

/// POST /admin/process-reservation/{src}/{id}
pub async fn process(
    admin: AdminUser,
    State(state): State<AppState>,
    session: AppSession,
    Path((src, id)): Path<(String, DbId)>,
    Form(ret): Form<ReturnMonth>,
) -> AppResult<Redirect> {
    let src = ListSource::parse(&src)?;
    if !ReservationRepo::set_processed(&state.pool, id, ProcessedStatus::Processed).await? {
        return Err(not_found(id));
    }
    tracing::info!(reservation_id = id, user_id = admin.user_id, "Reservation processed");
    session.flash("Reservation marked as processed").await?;
    Ok(Redirect::to(&src.return_path(ret.month())))
}

/// POST /admin/delete-reservation/{src}/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    session: AppSession,
    Path((src, id)): Path<(String, DbId)>,
    Form(ret): Form<ReturnMonth>,
) -> AppResult<Redirect> {
    let src = ListSource::parse(&src)?;
    if !ReservationRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(reservation_id = id, user_id = admin.user_id, "Reservation deleted");
    session.flash("Reservation deleted").await?;
    Ok(Redirect::to(&src.return_path(ret.month())))
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

/// GET /admin/reservations-calendar?y=&m=
///
/// Remembers the rendered blocks in the session so the following POST can
/// tell which ones were unchecked.
pub async fn calendar(
    _admin: AdminUser,
    State(state): State<AppState>,
    session: AppSession,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Html<String>> {
    let month = CalendarMonth::from_query(query.y, query.m, Utc::now().date_naive())?;

    let mut rooms = Vec::new();
    let mut block_maps = BlockMaps::new();
    for room in RoomRepo::list(&state.pool).await? {
        let spans: Vec<_> =
            RoomRestrictionRepo::list_for_room_in_range(&state.pool, room.id, month.range())
                .await?
                .iter()
                .filter_map(|r| r.span())
                .collect();
        let occupancy = RoomOccupancy::for_month(month, &spans);
        block_maps.insert(room.id, occupancy.blocks.clone());
        rooms.push(CalendarRoom { room, occupancy });
    }
    session.set_block_maps(block_maps).await?;

    let page = CalendarPage { month, rooms };
    Ok(views::render(&session.page_context().await?, &page))
}

/// POST /admin/reservations-calendar
pub async fn calendar_submit(
    admin: AdminUser,
    State(state): State<AppState>,
    session: AppSession,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Redirect> {
    let field = |name: &str| {
        fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    };
    let month = ReturnMonth {
        y: field("y"),
        m: field("m"),
    }
    .month()
    .unwrap_or_else(|| CalendarMonth::containing(Utc::now().date_naive()));

    let posted: HashSet<String> = fields.iter().map(|(k, _)| k.clone()).collect();

    let (mut removed, mut stale) = (0usize, 0usize);
    for (room_id, prior) in session.block_maps().await? {
        for block_id in blocks_to_remove(room_id, &prior, &posted) {
            if RoomRestrictionRepo::delete_block(&state.pool, block_id).await? {
                removed += 1;
            } else {
                stale += 1;
            }
        }
    }

    let room_ids: HashSet<DbId> = RoomRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();
    let mut added = 0usize;
    for (room_id, day) in blocks_to_add(posted.iter().map(String::as_str)) {
        if room_ids.contains(&room_id) {
            RoomRestrictionRepo::create_block(&state.pool, room_id, day).await?;
            added += 1;
        }
    }

    tracing::info!(user_id = admin.user_id, added, removed, stale, "Calendar blocks updated");
    session.flash("Changes saved").await?;
    if stale > 0 {
        session.warning(STALE_BLOCKS).await?;
    }
    Ok(Redirect::to(&calendar_path(month)))
}
