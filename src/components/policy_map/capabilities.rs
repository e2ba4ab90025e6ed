use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{MediaQueryList, Window};

use crate::components::dom::EventSubscription;

pub const HOVER_QUERY: &str = "(hover: hover) and (pointer: fine)";
pub const COARSE_QUERY: &str = "(pointer: coarse)";

/// What the current pointing device can do. Both flags start false so nothing
/// hover-driven happens before the first probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCapabilities {
	/// Fine pointer that can hover (mouse, trackpad).
	pub hover: bool,
	/// Coarse pointer (finger).
	pub coarse: bool,
}

#[derive(Clone)]
struct MediaProbe {
	hover: MediaQueryList,
	coarse: MediaQueryList,
}

impl MediaProbe {
	fn open(window: &Window) -> Option<Self> {
		let has_match_media =
			js_sys::Reflect::has(window, &JsValue::from_str("matchMedia")).unwrap_or(false);
		if !has_match_media {
			return None;
		}
		let query = |q: &str| window.match_media(q).ok().flatten();
		Some(Self {
			hover: query(HOVER_QUERY)?,
			coarse: query(COARSE_QUERY)?,
		})
	}

	fn read(&self) -> InputCapabilities {
		InputCapabilities {
			hover: self.hover.matches(),
			coarse: self.coarse.matches(),
		}
	}

	// Older engines expose MediaQueryList without EventTarget methods.
	fn notifies_changes(&self) -> bool {
		js_sys::Reflect::has(&self.hover, &JsValue::from_str("addEventListener")).unwrap_or(false)
	}

	fn refresher(&self, caps: RwSignal<InputCapabilities>) -> impl FnMut() + 'static {
		let probe = self.clone();
		move || {
			let next = probe.read();
			if caps.get_untracked() != next {
				debug!("Input capabilities changed: {next:?}");
				caps.set(next);
			}
		}
	}
}

/// Tracks pointer capabilities, probing once after mount and again whenever
/// the platform reports a change.
pub fn use_input_capabilities() -> Signal<InputCapabilities> {
	let caps = RwSignal::new(InputCapabilities::default());
	let subscriptions = StoredValue::new_local(Vec::<EventSubscription>::new());

	Effect::new(move |_| {
		let Some(window) = web_sys::window() else {
			warn!("No window; assuming least-capable input");
			return;
		};
		let Some(probe) = MediaProbe::open(&window) else {
			warn!("matchMedia unavailable; assuming least-capable input");
			return;
		};
		caps.set(probe.read());
		info!("Input capabilities: {:?}", caps.get_untracked());

		let subs: Vec<EventSubscription> = if probe.notifies_changes() {
			[&probe.hover, &probe.coarse]
				.into_iter()
				.filter_map(|list| EventSubscription::new(list, "change", probe.refresher(caps)))
				.collect()
		} else {
			debug!("No media change events; re-probing on window focus");
			EventSubscription::new(&window, "focus", probe.refresher(caps))
				.into_iter()
				.collect()
		};
		subscriptions.set_value(subs);
	});

	caps.read_only().into()
}
