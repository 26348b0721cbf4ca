/// Path segments that identify catalog pages by level
///
/// An anchor is only followed when its raw `href` contains the marker for the
/// level being discovered. The check runs on the attribute text before it is
/// resolved, so relative and absolute hrefs are treated alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathMarker {
    /// Learning paths listed on a course page
    Paths,
    /// Modules listed on a learning path page
    Modules,
}

impl PathMarker {
    /// The literal segment searched for in an href
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Paths => "/training/paths/",
            Self::Modules => "/training/modules/",
        }
    }

    /// Checks whether an href points at this level
    ///
    /// # Examples
    ///
    /// ```
    /// use learn_digest::url::PathMarker;
    ///
    /// assert!(PathMarker::Paths.matches("/en-us/training/paths/azure-fundamentals/"));
    /// assert!(!PathMarker::Paths.matches("/en-us/training/modules/intro-to-azure/"));
    /// assert!(PathMarker::Modules.matches("https://learn.example.com/training/modules/x/"));
    /// ```
    pub fn matches(&self, href: &str) -> bool {
        href.contains(self.segment())
    }
}
