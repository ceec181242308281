//! Content-type policies and per-operation configuration.

/// Content type of Word (`.docx`) documents.
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Content types accepted for bundling into an archive.
pub const BUNDLE_CONTENT_TYPES: [&str; 4] = [DOCX, "application/xml", "image/jpeg", "image/png"];

/// Content types accepted as mail attachments.
pub const MAIL_CONTENT_TYPES: [&str; 2] = [DOCX, "application/pdf"];

/// Suggested file name for a bundled archive.
pub const ARCHIVE_NAME: &str = "archive.zip";

/// Ordered set of accepted content-type prefixes.
///
/// A declared content type is accepted when it starts with any entry, so
/// `image/png; charset=binary` passes an allow-list holding `image/png`.
///
/// # Examples
///
/// ```
/// use ziprelay_core::AllowList;
///
/// let list = AllowList::mailing();
/// assert!(list.permits("application/pdf"));
/// assert!(!list.permits("image/png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    prefixes: Vec<String>,
}

impl AllowList {
    /// Creates an allow-list from arbitrary prefixes.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Allow-list for bundling: docx, xml, jpeg, png.
    #[must_use]
    pub fn bundling() -> Self {
        Self::new(BUNDLE_CONTENT_TYPES)
    }

    /// Allow-list for mailing: docx, pdf.
    #[must_use]
    pub fn mailing() -> Self {
        Self::new(MAIL_CONTENT_TYPES)
    }

    /// Returns `true` if `content_type` starts with one of the prefixes.
    #[must_use]
    pub fn permits(&self, content_type: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| content_type.starts_with(prefix.as_str()))
    }

    /// Accepted prefixes, in declaration order.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

/// Configuration for [`bundle_files`](crate::bundle::bundle_files).
///
/// # Examples
///
/// ```
/// use ziprelay_core::AllowList;
/// use ziprelay_core::BundleConfig;
///
/// let config = BundleConfig::default();
/// assert_eq!(config.archive_name, "archive.zip");
///
/// let relaxed = BundleConfig::default().with_allowed_types(AllowList::new(["text/"]));
/// assert!(relaxed.allowed_types.permits("text/plain"));
/// ```
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Content types accepted for bundling.
    ///
    /// Default: [`AllowList::bundling`].
    pub allowed_types: AllowList,

    /// Suggested name of the produced archive.
    ///
    /// Default: `archive.zip`.
    pub archive_name: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            allowed_types: AllowList::bundling(),
            archive_name: ARCHIVE_NAME.to_string(),
        }
    }
}

impl BundleConfig {
    /// Creates a new `BundleConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the accepted content types.
    #[must_use]
    pub fn with_allowed_types(mut self, allowed_types: AllowList) -> Self {
        self.allowed_types = allowed_types;
        self
    }
}

/// Configuration for [`dispatch_mail`](crate::mail::dispatch_mail).
///
/// The sender identity is deployment configuration; everything else is
/// fixed for the single attachment message this crate sends.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Content types accepted as attachments.
    ///
    /// Default: [`AllowList::mailing`].
    pub allowed_types: AllowList,

    /// Sender address placed in the `From` header.
    pub sender: String,

    /// Message subject.
    ///
    /// Default: `File Attachment`.
    pub subject: String,

    /// Plain-text message body.
    ///
    /// Default: `Please find the attached file.`
    pub body: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            allowed_types: AllowList::mailing(),
            sender: String::new(),
            subject: "File Attachment".to_string(),
            body: "Please find the attached file.".to_string(),
        }
    }
}

impl MailConfig {
    /// Creates a mail configuration sending from `sender`.
    #[must_use]
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            ..Self::default()
        }
    }

    /// Replaces the accepted content types.
    #[must_use]
    pub fn with_allowed_types(mut self, allowed_types: AllowList) -> Self {
        self.allowed_types = allowed_types;
        self
    }
}
