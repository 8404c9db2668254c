//! Notification contracts used by the page-visibility demo.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::DeviceFuture;

/// Result of `Notification.requestPermission()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationPermission {
    /// The user allowed notifications.
    Granted,
    /// The user blocked notifications.
    Denied,
    /// The user dismissed the prompt.
    Default,
}

impl NotificationPermission {
    /// Parses the DOM token; unknown tokens map to [`NotificationPermission::Default`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Default,
        }
    }
}

/// A notification shown through the service worker registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// Icon URL.
    pub icon: String,
}

/// Host service for user-visible notifications.
pub trait NotificationService {
    /// Asks the user for notification permission.
    fn request_permission<'a>(&'a self) -> DeviceFuture<'a, NotificationPermission>;

    /// Shows `notice` through the active service worker registration.
    fn show<'a>(&'a self, notice: &'a Notice) -> DeviceFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Notification service that never gets permission.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn request_permission<'a>(&'a self) -> DeviceFuture<'a, NotificationPermission> {
        Box::pin(async { NotificationPermission::Denied })
    }

    fn show<'a>(&'a self, _notice: &'a Notice) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async { Err("notifications are unavailable".to_string()) })
    }
}

#[derive(Debug, Clone)]
/// In-memory notification center recording shown notices.
pub struct MemoryNotificationService {
    permission: Rc<RefCell<NotificationPermission>>,
    shown: Rc<RefCell<Vec<Notice>>>,
}

impl MemoryNotificationService {
    /// Creates a service answering permission prompts with `permission`.
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Rc::new(RefCell::new(permission)),
            shown: Rc::default(),
        }
    }

    /// Notices shown so far.
    pub fn shown(&self) -> Vec<Notice> {
        self.shown.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn request_permission<'a>(&'a self) -> DeviceFuture<'a, NotificationPermission> {
        Box::pin(async move { *self.permission.borrow() })
    }

    fn show<'a>(&'a self, notice: &'a Notice) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.shown.borrow_mut().push(notice.clone());
            Ok(())
        })
    }
}
