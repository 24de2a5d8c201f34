use crate::catalog::CatalogState;
use crate::endpoints::Endpoints;
use crate::format::{meta_line, zone_summary};
use crate::zone::{ZoneId, ZoneRecord};

/// One catalog card, ready for the DOM adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCard {
    pub id: ZoneId,
    pub name: String,
    pub cover_url: String,
    pub fallback_cover_url: String,
    pub meta: String,
}

/// Full description of the catalog area for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogView {
    pub summary: String,
    pub visible_count: usize,
    pub cards: Vec<ZoneCard>,
    /// Shown in place of the cards when nothing matches.
    pub empty_message: Option<String>,
}

pub fn card_for(zone: &ZoneRecord, downloads: u64, endpoints: &Endpoints) -> ZoneCard {
    ZoneCard {
        id: zone.id.clone(),
        name: zone.name.clone(),
        cover_url: endpoints.cover_for(&zone.id),
        fallback_cover_url: endpoints.placeholder_cover.clone(),
        meta: meta_line(zone.id.as_str(), downloads),
    }
}

/// Project the visible subset of the catalog into cards, in catalog order.
pub fn render(state: &CatalogState, endpoints: &Endpoints) -> CatalogView {
    let cards: Vec<ZoneCard> = state
        .visible()
        .into_iter()
        .map(|zone| card_for(zone, state.downloads(zone), endpoints))
        .collect();

    let empty_message = cards.is_empty().then(|| {
        if state.query().is_empty() {
            "No zones available".to_string()
        } else {
            format!("No zones match \"{}\"", state.query())
        }
    });

    CatalogView {
        summary: zone_summary(cards.len()),
        visible_count: cards.len(),
        cards,
        empty_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortKey;

    fn state() -> CatalogState {
        let mut state = CatalogState::new(vec![
            ZoneRecord::new(1, "Alpha"),
            ZoneRecord::new(2, "Beta"),
        ]);
        state.set_popularity([("1", 5), ("2", 50_000)].into_iter().collect());
        state
    }

    #[test]
    fn renders_cards_in_sorted_order() {
        let mut state = state();
        state.sort_by(SortKey::Popular);
        let view = render(&state, &Endpoints::default());
        let names: Vec<&str> = view.cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
        assert_eq!(view.summary, "2 zones");
        assert_eq!(view.visible_count, 2);
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn card_fields() {
        let view = render(&state(), &Endpoints::default());
        let beta = &view.cards[1];
        assert_eq!(beta.cover_url, "/covers/2.png");
        assert_eq!(beta.fallback_cover_url, "/img/placeholder.svg");
        assert_eq!(beta.meta, "ID: #2 | Downloads: 50,000");
    }

    #[test]
    fn missing_popularity_shows_zero() {
        let state = CatalogState::new(vec![ZoneRecord::new(9, "Nine")]);
        let view = render(&state, &Endpoints::default());
        assert_eq!(view.cards[0].meta, "ID: #9 | Downloads: 0");
        assert_eq!(view.summary, "1 zone");
    }

    #[test]
    fn no_matches_reports_query() {
        let mut state = state();
        state.set_query("zzz");
        let view = render(&state, &Endpoints::default());
        assert!(view.cards.is_empty());
        assert_eq!(view.summary, "0 zones");
        assert_eq!(view.empty_message.as_deref(), Some("No zones match \"zzz\""));
    }
}
