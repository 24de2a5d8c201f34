use crate::catalog::CatalogState;
use crate::endpoints::{BLANK_FRAME, Endpoints};
use crate::zone::{ZoneId, ZoneRecord};

/// The zone currently shown in the viewer modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSession {
    pub id: ZoneId,
    pub name: String,
    pub frame_src: String,
}

/// Viewer modal lifecycle: `Closed -> Open -> Closed`. Opening while already
/// open replaces the session; the frame source change discards old content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open(ViewerSession),
}

impl ViewerState {
    pub fn open(&mut self, zone: &ZoneRecord, endpoints: &Endpoints) {
        *self = Self::Open(ViewerSession {
            id: zone.id.clone(),
            name: zone.name.clone(),
            frame_src: endpoints.content_for(&zone.id),
        });
    }

    /// Open the zone named by a `?id=` deep link. Ids are compared loosely
    /// (`02` finds `2`). An absent or unknown id leaves the viewer untouched.
    pub fn open_deep_link(
        &mut self,
        catalog: &CatalogState,
        raw_id: Option<&str>,
        endpoints: &Endpoints,
    ) -> bool {
        let Some(zone) = raw_id.and_then(|raw| catalog.find(raw)) else {
            return false;
        };
        self.open(zone, endpoints);
        true
    }

    /// Point the frame at an empty document without closing the modal.
    /// Returns false when there is no open session.
    pub fn reset_frame(&mut self) -> bool {
        match self {
            Self::Open(session) => {
                session.frame_src = BLANK_FRAME.to_string();
                true
            }
            Self::Closed => false,
        }
    }

    /// Point the frame back at the zone's content after a reset.
    pub fn reload(&mut self, endpoints: &Endpoints) -> bool {
        match self {
            Self::Open(session) => {
                session.frame_src = endpoints.content_for(&session.id);
                true
            }
            Self::Closed => false,
        }
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn session(&self) -> Option<&ViewerSession> {
        match self {
            Self::Open(session) => Some(session),
            Self::Closed => None,
        }
    }

    /// Source for the embedded frame; blank whenever the modal is closed so
    /// embedded media stops.
    pub fn frame_src(&self) -> &str {
        match self {
            Self::Open(session) => &session.frame_src,
            Self::Closed => BLANK_FRAME,
        }
    }

    /// Page scrolling is suspended while a zone is open.
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_with_blank_frame() {
        let viewer = ViewerState::default();
        assert!(!viewer.is_open());
        assert_eq!(viewer.frame_src(), "about:blank");
        assert!(!viewer.scroll_locked());
    }

    #[test]
    fn open_sets_session_and_locks_scroll() {
        let mut viewer = ViewerState::default();
        viewer.open(&ZoneRecord::new(2, "Beta"), &Endpoints::default());
        let session = viewer.session().unwrap();
        assert_eq!(session.name, "Beta");
        assert_eq!(session.id.as_str(), "2");
        assert_eq!(viewer.frame_src(), "/zones/zone-2.html");
        assert!(viewer.scroll_locked());
    }

    fn alpha_beta() -> CatalogState {
        CatalogState::new(vec![ZoneRecord::new(1, "Alpha"), ZoneRecord::new(2, "Beta")])
    }

    #[test]
    fn deep_link_opens_matching_zone() {
        let mut viewer = ViewerState::default();
        assert!(viewer.open_deep_link(&alpha_beta(), Some("2"), &Endpoints::default()));
        let session = viewer.session().unwrap();
        assert_eq!(session.name, "Beta");
        assert_eq!(session.frame_src, "/zones/zone-2.html");
    }

    #[test]
    fn deep_link_compares_ids_loosely() {
        let mut viewer = ViewerState::default();
        assert!(viewer.open_deep_link(&alpha_beta(), Some(" 02 "), &Endpoints::default()));
        assert_eq!(viewer.session().map(|s| s.name.as_str()), Some("Beta"));
    }

    #[test]
    fn unknown_or_missing_deep_link_stays_closed() {
        let catalog = alpha_beta();
        let endpoints = Endpoints::default();
        let mut viewer = ViewerState::default();
        assert!(!viewer.open_deep_link(&catalog, Some("9"), &endpoints));
        assert_eq!(viewer, ViewerState::Closed);
        assert!(!viewer.open_deep_link(&catalog, None, &endpoints));
        assert_eq!(viewer, ViewerState::Closed);
        assert!(!viewer.open_deep_link(&CatalogState::default(), Some("2"), &endpoints));
        assert_eq!(viewer, ViewerState::Closed);
    }

    #[test]
    fn reopening_overwrites_session() {
        let endpoints = Endpoints::default();
        let mut viewer = ViewerState::default();
        viewer.open(&ZoneRecord::new(1, "Alpha"), &endpoints);
        viewer.open(&ZoneRecord::new(2, "Beta"), &endpoints);
        assert_eq!(viewer.session().map(|s| s.name.as_str()), Some("Beta"));
    }

    #[test]
    fn reset_keeps_modal_open() {
        let endpoints = Endpoints::default();
        let mut viewer = ViewerState::default();
        viewer.open(&ZoneRecord::new(1, "Alpha"), &endpoints);
        assert!(viewer.reset_frame());
        assert!(viewer.is_open());
        assert_eq!(viewer.frame_src(), "about:blank");
        assert!(viewer.reload(&endpoints));
        assert_eq!(viewer.frame_src(), "/zones/zone-1.html");
    }

    #[test]
    fn reset_and_reload_on_closed_are_noops() {
        let mut viewer = ViewerState::default();
        assert!(!viewer.reset_frame());
        assert!(!viewer.reload(&Endpoints::default()));
        assert_eq!(viewer, ViewerState::Closed);
    }

    #[test]
    fn close_blanks_frame_and_restores_scroll() {
        let mut viewer = ViewerState::default();
        viewer.open(&ZoneRecord::new(1, "Alpha"), &Endpoints::default());
        viewer.close();
        assert!(!viewer.is_open());
        assert_eq!(viewer.frame_src(), "about:blank");
        assert!(!viewer.scroll_locked());
    }
}
