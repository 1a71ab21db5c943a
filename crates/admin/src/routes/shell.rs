//! Page chrome shared by every signed-in page: sidebar, header user menu and
//! the notifications panel.

use tower_sessions::Session;

use crate::{
    models::{
        ArchiveEntry, Bill, CurrentUser, DamageReturn, Product, PurchaseOrder, session_keys,
    },
    services::dashboard::{self, Notification, Snapshot},
    state::AppState,
};

/// Signed-in user view for templates.
#[derive(Debug, Clone)]
pub struct UserView {
    pub name: String,
    pub contact: String,
    pub initial: String,
    pub photo_url: Option<String>,
    pub provider: String,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            name: user.name(),
            contact: user.contact(),
            initial: user.initial(),
            photo_url: user.photo_url.clone(),
            provider: user.provider.to_string(),
        }
    }
}

/// Notification view for the header panel.
#[derive(Debug, Clone)]
pub struct NotificationView {
    pub level: &'static str,
    pub badge_class: &'static str,
    pub message: String,
    pub link: String,
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        Self {
            level: notification.level.as_str(),
            badge_class: notification.level.badge_class(),
            message: notification.message,
            link: notification.link,
        }
    }
}

/// Everything the base layout needs.
#[derive(Debug, Clone)]
pub struct Shell {
    pub user: UserView,
    pub current_path: String,
    pub sidebar_collapsed: bool,
    pub organization: String,
    pub notifications: Vec<NotificationView>,
}

impl Shell {
    /// Build the chrome for `current_path`, deriving notifications from
    /// the current records.
    pub async fn load(
        state: &AppState,
        session: &Session,
        user: &CurrentUser,
        current_path: &str,
    ) -> Self {
        let records = Records::load(state).await;
        Self::with_records(state, session, user, current_path, &records).await
    }

    /// Same as [`Shell::load`] for handlers that already hold the records.
    pub async fn with_records(
        state: &AppState,
        session: &Session,
        user: &CurrentUser,
        current_path: &str,
        records: &Records,
    ) -> Self {
        let sidebar_collapsed = session
            .get::<bool>(session_keys::SIDEBAR_COLLAPSED)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        Self {
            user: UserView::from(user),
            current_path: current_path.to_string(),
            sidebar_collapsed,
            organization: state.config().organization.name.clone(),
            notifications: dashboard::notifications(records.snapshot())
                .into_iter()
                .map(NotificationView::from)
                .collect(),
        }
    }

    /// Whether the nav link for `prefix` is the active one.
    #[must_use]
    pub fn is_active(&self, prefix: &str) -> bool {
        self.current_path == prefix || self.current_path.starts_with(&format!("{prefix}/"))
    }
}

/// Owned copy of every collection, taken once per request.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub products: Vec<Product>,
    pub orders: Vec<PurchaseOrder>,
    pub bills: Vec<Bill>,
    pub returns: Vec<DamageReturn>,
    pub archive: Vec<ArchiveEntry>,
}

impl Records {
    pub async fn load(state: &AppState) -> Self {
        let (products, orders, bills, returns, archive) = tokio::join!(
            state.products().list(),
            state.orders().list(),
            state.bills().list(),
            state.returns().list(),
            state.archive().list(),
        );
        Self {
            products,
            orders,
            bills,
            returns,
            archive,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            products: &self.products,
            orders: &self.orders,
            bills: &self.bills,
            returns: &self.returns,
            archive: &self.archive,
        }
    }
}
