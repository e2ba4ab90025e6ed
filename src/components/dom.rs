use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::EventTarget;

/// An event listener that is removed again when dropped.
pub struct EventSubscription {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl EventSubscription {
	pub fn new(target: &EventTarget, event: &'static str, f: impl FnMut() + 'static) -> Option<Self> {
		let callback = Closure::<dyn FnMut()>::new(f);
		if let Err(e) =
			target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
		{
			warn!("Failed to listen for {event}: {e:?}");
			return None;
		}
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for EventSubscription {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}
