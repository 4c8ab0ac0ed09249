use crate::app::TooltipData;
use crate::domain::market_data::{MarketSnapshot, PlayerName};
use leptos::*;
use once_cell::sync::OnceCell;

pub struct Globals {
    pub snapshot: RwSignal<MarketSnapshot>,
    pub selected_player: RwSignal<Option<PlayerName>>,
    pub total_trades: RwSignal<usize>,
    pub total_volume: RwSignal<u64>,
    pub active_players: RwSignal<usize>,
    pub is_loading: RwSignal<bool>,
    pub is_live: RwSignal<bool>,
    pub last_error: RwSignal<Option<String>>,
    pub tooltip_data: RwSignal<Option<TooltipData>>,
    pub tooltip_visible: RwSignal<bool>,
    pub is_panning: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        snapshot: create_rw_signal(MarketSnapshot::empty()),
        selected_player: create_rw_signal(None),
        total_trades: create_rw_signal(0),
        total_volume: create_rw_signal(0),
        active_players: create_rw_signal(0),
        is_loading: create_rw_signal(false),
        is_live: create_rw_signal(false),
        last_error: create_rw_signal(None),
        tooltip_data: create_rw_signal(None),
        tooltip_visible: create_rw_signal(false),
        is_panning: create_rw_signal(false),
    })
}

crate::global_signals! {
    pub snapshot_signal => snapshot: MarketSnapshot,
    pub selected_player_signal => selected_player: Option<PlayerName>,
    pub tooltip_data_signal => tooltip_data: Option<TooltipData>,
    pub tooltip_visible_signal => tooltip_visible: bool,
}
