//! Server-rendered HTML.
//!
//! Every page is a typed view model implementing [`View`]; [`render`] wraps
//! its body in the shared layout together with the one-shot notices taken
//! from the session. All interpolated text goes through [`escape`].

pub mod admin;
pub mod public;

use std::fmt::Write;

use axum::http::StatusCode;
use axum::response::Html;
use bookings_core::forms::FormErrors;

pub use admin::{
    CalendarPage, CalendarRoom, DashboardPage, LoginPage, ReservationListPage, ReservationPage,
};
pub use public::{
    AboutPage, ChooseRoomPage, ContactPage, HomePage, MakeReservationPage, RoomPage, SearchPage,
    SummaryPage,
};

/// Messages carried over from the previous request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    pub flash: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// Per-request data every page layout needs.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub notices: Notices,
    pub is_authenticated: bool,
}

/// A page body with a title.
pub trait View {
    fn title(&self) -> String;
    fn body(&self, out: &mut String);
}

/// Render `view` inside the shared layout.
pub fn render(ctx: &PageContext, view: &impl View) -> Html<String> {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} | Fort Smythe Bed &amp; Breakfast</title>\n</head>\n<body>\n",
        escape(&view.title())
    );
    nav(ctx, &mut out);
    notices(&ctx.notices, &mut out);
    out.push_str("<main class=\"container\">\n");
    view.body(&mut out);
    out.push_str("</main>\n<footer><p>&copy; Fort Smythe Bed &amp; Breakfast</p></footer>\n</body>\n</html>\n");
    Html(out)
}

fn nav(ctx: &PageContext, out: &mut String) {
    out.push_str(
        "<nav>\n<a href=\"/\">Home</a>\n<a href=\"/about\">About</a>\n\
         <a href=\"/generals-quarters\">General's Quarters</a>\n\
         <a href=\"/majors-suite\">Major's Suite</a>\n\
         <a href=\"/search-availability\">Book Now</a>\n<a href=\"/contact\">Contact</a>\n",
    );
    if ctx.is_authenticated {
        out.push_str("<a href=\"/admin/dashboard\">Admin</a>\n<a href=\"/user/logout\">Logout</a>\n");
    } else {
        out.push_str("<a href=\"/user/login\">Login</a>\n");
    }
    out.push_str("</nav>\n");
}

fn notices(notices: &Notices, out: &mut String) {
    for (class, message) in [
        ("flash", &notices.flash),
        ("warning", &notices.warning),
        ("error", &notices.error),
    ] {
        if let Some(message) = message {
            let _ = writeln!(out, "<div class=\"alert alert-{class}\">{}</div>", escape(message));
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A labelled text input with its error message, if any.
pub(crate) fn text_input(
    out: &mut String,
    errors: &FormErrors,
    name: &str,
    label: &str,
    kind: &str,
    value: &str,
) {
    let invalid = if errors.has(name) { " is-invalid" } else { "" };
    let _ = writeln!(
        out,
        "<div class=\"field\">\n<label for=\"{name}\">{label}</label>\n\
         <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" class=\"form-control{invalid}\" value=\"{}\">",
        escape(value)
    );
    if let Some(message) = errors.get(name) {
        let _ = writeln!(out, "<div class=\"invalid-feedback\">{}</div>", escape(message));
    }
    out.push_str("</div>\n");
}

/// Rendered for any [`AppError`](crate::error::AppError).
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

impl View for ErrorPage {
    fn title(&self) -> String {
        self.status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string()
    }

    fn body(&self, out: &mut String) {
        let _ = write!(
            out,
            "<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to the home page</a></p>\n",
            self.status.as_u16(),
            escape(&self.title()),
            escape(&self.message)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Major's" & co</b>"#),
            "&lt;b&gt;&quot;Major&#39;s&quot; &amp; co&lt;/b&gt;"
        );
    }

    #[test]
    fn layout_shows_and_escapes_notices() {
        let ctx = PageContext {
            notices: Notices {
                error: Some("<No availability>".into()),
                ..Default::default()
            },
            is_authenticated: false,
        };
        let page = ErrorPage {
            status: StatusCode::NOT_FOUND,
            message: "missing".into(),
        };
        let Html(html) = render(&ctx, &page);
        assert!(html.contains("alert-error\">&lt;No availability&gt;"));
        assert!(html.contains("<title>Not Found |"));
        assert!(html.contains("href=\"/user/login\""));
    }

    #[test]
    fn authenticated_layout_links_admin() {
        let ctx = PageContext {
            is_authenticated: true,
            ..Default::default()
        };
        let page = ErrorPage {
            status: StatusCode::BAD_REQUEST,
            message: String::new(),
        };
        let Html(html) = render(&ctx, &page);
        assert!(html.contains("/admin/dashboard"));
        assert!(html.contains("/user/logout"));
    }

    #[test]
    fn text_input_marks_invalid_fields() {
        let mut errors = FormErrors::default();
        errors.add("email", "Invalid email address");
        let mut out = String::new();
        text_input(&mut out, &errors, "email", "Email", "email", "x\"y");
        assert!(out.contains("is-invalid"));
        assert!(out.contains("value=\"x&quot;y\""));
        assert!(out.contains("Invalid email address"));
    }
}
