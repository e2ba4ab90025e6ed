use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::{FocusEvent, KeyboardEvent, MouseEvent};

use super::capabilities::{InputCapabilities, use_input_capabilities};
use super::catalog::{Catalog, UseCaseKey};
use super::config::DiagramConfig;
use super::info_panel::{ARROW, InfoPanel};
use super::layout::Layout;
use super::scene::{
	CENTER_CARD_HEIGHT, CENTER_CARD_WIDTH, CategoryGlyph, HUB_RADIUS, RING_COLOR, Scene, Spoke,
	UseCaseGlyph,
};
use super::state::{Anchor, CollapseTicket, InteractionState};

/// Routes DOM events into the interaction state and owns the collapse timer.
#[derive(Clone, Copy)]
struct Dispatcher {
	state: RwSignal<InteractionState>,
	caps: Signal<InputCapabilities>,
	config: Signal<DiagramConfig>,
	timer: StoredValue<Option<TimeoutHandle>>,
}

impl Dispatcher {
	fn cancel_timer(self) {
		self.timer.try_update_value(|t| {
			if let Some(handle) = t.take() {
				handle.clear();
			}
		});
	}

	fn hover_enter(self, id: &str) {
		let caps = self.caps.get_untracked();
		self.cancel_timer();
		self.state.update(|s| s.hover_enter(id, caps));
	}

	fn hover_leave(self, id: &str) {
		let caps = self.caps.get_untracked();
		if let Some(ticket) = self.state.try_update(|s| s.hover_leave(id, caps)).flatten() {
			self.schedule_collapse(ticket);
		}
	}

	fn focus_enter(self, id: &str) {
		let caps = self.caps.get_untracked();
		self.cancel_timer();
		self.state.update(|s| s.focus_enter(id, caps));
	}

	fn focus_leave(self, id: &str) {
		let caps = self.caps.get_untracked();
		if let Some(ticket) = self.state.try_update(|s| s.focus_leave(id, caps)).flatten() {
			self.schedule_collapse(ticket);
		}
	}

	fn schedule_collapse(self, ticket: CollapseTicket) {
		self.cancel_timer();

		let (state, timer) = (self.state, self.timer);
		let delay = self.config.with_untracked(DiagramConfig::collapse_delay);
		let fire = move || {
			timer.try_set_value(None);
			state.try_update(|s| s.collapse_elapsed(ticket));
		};
		match set_timeout_with_handle(fire, delay) {
			Ok(handle) => self.timer.set_value(Some(handle)),
			Err(e) => {
				warn!("Failed to schedule collapse: {e:?}");
				state.update(|s| {
					s.collapse_elapsed(ticket);
				});
			}
		}
	}

	fn activate_category(self, id: &str) {
		let caps = self.caps.get_untracked();
		if !caps.hover {
			self.cancel_timer();
		}
		self.state.update(|s| s.activate_category(id, caps));
	}

	fn activate_use_case(self, key: &UseCaseKey) {
		self.state.update(|s| {
			s.activate_use_case(key);
		});
	}

	fn select_anchor(self, anchor: Anchor) {
		self.state.update(|s| s.select_anchor(anchor));
	}

	fn dismiss(self) {
		self.cancel_timer();
		self.state.update(InteractionState::dismiss);
	}
}

fn is_activation_key(ev: &KeyboardEvent) -> bool {
	matches!(ev.key().as_str(), "Enter" | " ")
}

fn num(v: f64) -> String {
	format!("{v:.2}")
}

#[component]
pub fn PolicyMap(catalog: Arc<Catalog>, #[prop(into)] config: Signal<DiagramConfig>) -> impl IntoView {
	let caps = use_input_capabilities();
	let state = RwSignal::new(InteractionState::new());
	let timer = StoredValue::new(None::<TimeoutHandle>);
	let dispatch = Dispatcher {
		state,
		caps,
		config,
		timer,
	};
	on_cleanup(move || dispatch.cancel_timer());

	let layout = {
		let catalog = catalog.clone();
		Memo::new(move |_| {
			debug!("Computing layout");
			config.with(|c| Layout::compute(&catalog, c))
		})
	};
	let scene = {
		let catalog = catalog.clone();
		Memo::new(move |_| {
			let caps = caps.get();
			layout.with(|l| config.with(|c| state.with(|s| Scene::build(&catalog, l, s, caps, c))))
		})
	};
	let selected = Memo::new(move |_| state.with(|s| s.selected().clone()));

	let on_canvas_click = move |ev: MouseEvent| {
		if ev.target() == ev.current_target() {
			dispatch.dismiss();
		}
	};

	view! {
		<div class="policy-map">
			<svg
				class="policy-map-canvas"
				viewBox=move || scene.with(|s| format!("0 0 {} {}", s.width, s.height))
				preserveAspectRatio="xMidYMid meet"
				on:click=on_canvas_click
			>
				<rect
					x="0"
					y="0"
					width=move || scene.with(|s| num(s.width))
					height=move || scene.with(|s| num(s.height))
					fill="transparent"
					on:click=move |_| dispatch.dismiss()
				/>
				<Backdrop scene=scene />
				<CenterCard scene=scene dispatch=dispatch />
				<HubNode scene=scene dispatch=dispatch />
				<For
					each=move || scene.with(Scene::category_ids)
					key=|id| id.clone()
					children=move |id| view! { <CategoryGroup scene=scene dispatch=dispatch id=id /> }
				/>
			</svg>
			<InfoPanel catalog=catalog selected=selected />
		</div>
	}
}

fn spoke_view(spoke: &Spoke) -> impl IntoView + use<> {
	view! {
		<line
			x1=num(spoke.from.x)
			y1=num(spoke.from.y)
			x2=num(spoke.to.x)
			y2=num(spoke.to.y)
			stroke=spoke.color.clone()
			stroke-width=num(spoke.width)
			stroke-dasharray=spoke.style.dash_array()
			opacity=num(spoke.opacity)
		/>
	}
}

#[component]
fn Backdrop(scene: Memo<Scene>) -> impl IntoView {
	view! {
		<g class="backdrop">
			{move || scene.with(|s| s.spokes.iter().map(spoke_view).collect_view())}
			<circle
				cx=move || scene.with(|s| num(s.ring.center.x))
				cy=move || scene.with(|s| num(s.ring.center.y))
				r=move || scene.with(|s| num(s.ring.radius))
				fill="none"
				stroke=RING_COLOR
				stroke-dasharray="4 6"
				opacity=move || scene.with(|s| num(s.ring.opacity))
			/>
		</g>
	}
}

#[component]
fn CenterCard(scene: Memo<Scene>, dispatch: Dispatcher) -> impl IntoView {
	let center = Memo::new(move |_| scene.with(|s| s.center.clone()));
	let activate = move || dispatch.select_anchor(Anchor::Center);

	view! {
		<g
			role="button"
			tabindex="0"
			class="node focus-ring"
			aria-label=move || center.with(|c| c.title.clone())
			on:click=move |_| activate()
			on:keydown=move |ev: KeyboardEvent| {
				if is_activation_key(&ev) {
					ev.prevent_default();
					activate();
				}
			}
		>
			<rect
				x=move || center.with(|c| num(c.at.x - CENTER_CARD_WIDTH / 2.0))
				y=move || center.with(|c| num(c.at.y - CENTER_CARD_HEIGHT / 2.0))
				width=num(CENTER_CARD_WIDTH)
				height=num(CENTER_CARD_HEIGHT)
				rx="18"
				fill="#0b1220"
				stroke=move || center.with(|c| c.color.clone())
				stroke-width="2"
			/>
			<text
				x=move || center.with(|c| num(c.at.x))
				y=move || center.with(|c| num(c.at.y - 8.0))
				text-anchor="middle"
				class="label label-title"
			>
				{move || center.with(|c| c.title.clone())}
			</text>
			<text
				x=move || center.with(|c| num(c.at.x))
				y=move || center.with(|c| num(c.at.y + 18.0))
				text-anchor="middle"
				class="label label-subtitle"
			>
				{move || center.with(|c| c.subtitle.clone())}
			</text>
		</g>
	}
}

#[component]
fn HubNode(scene: Memo<Scene>, dispatch: Dispatcher) -> impl IntoView {
	let hub = Memo::new(move |_| scene.with(|s| s.hub.clone()));
	let activate = move || dispatch.select_anchor(Anchor::Hub);

	view! {
		<g
			role="button"
			tabindex="0"
			class="node focus-ring"
			aria-label=move || hub.with(|h| h.title.clone())
			on:click=move |_| activate()
			on:keydown=move |ev: KeyboardEvent| {
				if is_activation_key(&ev) {
					ev.prevent_default();
					activate();
				}
			}
		>
			<circle
				cx=move || hub.with(|h| num(h.at.x))
				cy=move || hub.with(|h| num(h.at.y))
				r=num(HUB_RADIUS)
				fill="#2a0f1f"
				stroke=move || hub.with(|h| h.color.clone())
				stroke-width="2"
			/>
			<text
				x=move || hub.with(|h| num(h.at.x))
				y=move || hub.with(|h| num(h.at.y - 2.0))
				text-anchor="middle"
				class="label label-hub"
			>
				{move || hub.with(|h| h.title.clone())}
			</text>
			<text
				x=move || hub.with(|h| num(h.at.x))
				y=move || hub.with(|h| num(h.at.y + 16.0))
				text-anchor="middle"
				class="label label-badge"
			>
				{move || hub.with(|h| h.subtitle.clone())}
			</text>
		</g>
	}
}

/// A category node plus its fan. Hover and focus handlers sit on the wrapping
/// group so moving from the category onto one of its use cases does not count
/// as leaving.
#[component]
fn CategoryGroup(scene: Memo<Scene>, dispatch: Dispatcher, id: String) -> impl IntoView {
	let glyph = {
		let id = id.clone();
		Memo::new(move |_| scene.with(|s| s.category(&id).cloned()))
	};
	let attr = move |f: fn(&CategoryGlyph) -> String| {
		move || glyph.with(|g| g.as_ref().map(f).unwrap_or_default())
	};

	let on_enter = {
		let id = id.clone();
		move |_: MouseEvent| dispatch.hover_enter(&id)
	};
	let on_leave = {
		let id = id.clone();
		move |_: MouseEvent| dispatch.hover_leave(&id)
	};
	let on_focus_in = {
		let id = id.clone();
		move |_: FocusEvent| dispatch.focus_enter(&id)
	};
	let on_focus_out = {
		let id = id.clone();
		move |_: FocusEvent| dispatch.focus_leave(&id)
	};
	let activate = {
		let id = id.clone();
		move || dispatch.activate_category(&id)
	};
	let on_key = {
		let activate = activate.clone();
		move |ev: KeyboardEvent| {
			if is_activation_key(&ev) {
				ev.prevent_default();
				activate();
			}
		}
	};
	let use_case_keys = move || {
		glyph.with(|g| {
			g.as_ref()
				.map(|g| g.use_cases.iter().map(|u| u.key.clone()).collect::<Vec<_>>())
				.unwrap_or_default()
		})
	};

	view! {
		<g
			class="category-group"
			on:mouseenter=on_enter
			on:mouseleave=on_leave
			on:focusin=on_focus_in
			on:focusout=on_focus_out
		>
			<g
				role="button"
				tabindex="0"
				class="node focus-ring"
				aria-label=id.clone()
				aria-expanded=attr(|g| g.expanded.to_string())
				opacity=attr(|g| num(g.opacity))
				on:click=move |_| activate()
				on:keydown=on_key
			>
				<circle
					cx=attr(|g| num(g.at.x))
					cy=attr(|g| num(g.at.y))
					r=attr(|g| num(g.radius))
					fill="#0f172a"
					stroke=attr(|g| g.color.clone())
					stroke-width="2"
				/>
				<text
					x=attr(|g| num(g.label_at.x))
					y=attr(|g| num(g.label_at.y))
					text-anchor="middle"
					class="label label-category"
					fill=attr(|g| g.color.clone())
				>
					{id.clone()}
				</text>
			</g>
			<For
				each=use_case_keys
				key=|key| key.clone()
				children=move |use_case| {
					view! { <UseCaseItem parent=glyph dispatch=dispatch use_case=use_case /> }
				}
			/>
		</g>
	}
}

#[component]
fn UseCaseItem(
	parent: Memo<Option<CategoryGlyph>>,
	dispatch: Dispatcher,
	use_case: UseCaseKey,
) -> impl IntoView {
	let key = use_case;
	let color = Memo::new(move |_| {
		parent.with(|p| p.as_ref().map(|p| p.color.clone()).unwrap_or_default())
	});
	let glyph = {
		let key = key.clone();
		Memo::new(move |_| parent.with(|p| p.as_ref().and_then(|p| p.use_case(&key)).cloned()))
	};
	let attr = move |f: fn(&UseCaseGlyph) -> String| {
		move || glyph.with(|g| g.as_ref().map(f).unwrap_or_default())
	};

	let activate = {
		let key = key.clone();
		move || dispatch.activate_use_case(&key)
	};
	let on_click = {
		let activate = activate.clone();
		move |ev: MouseEvent| {
			ev.stop_propagation();
			activate();
		}
	};
	let on_key = move |ev: KeyboardEvent| {
		if is_activation_key(&ev) {
			ev.prevent_default();
			activate();
		}
	};
	let label = format!("{} {ARROW} {}", key.category, key.use_case);

	view! {
		<g
			role="button"
			tabindex="0"
			class="node focus-ring"
			aria-label=label
			aria-pressed=attr(|g| g.focused.to_string())
			on:click=on_click
			on:keydown=on_key
		>
			<line
				x1=attr(|g| num(g.connector_from.x))
				y1=attr(|g| num(g.connector_from.y))
				x2=attr(|g| num(g.at.x))
				y2=attr(|g| num(g.at.y))
				stroke=move || color.get()
				stroke-width=attr(|g| num(g.connector_width))
				stroke-opacity=attr(|g| num(g.connector_opacity))
			/>
			<circle
				cx=attr(|g| num(g.at.x))
				cy=attr(|g| num(g.at.y))
				r=attr(|g| num(g.radius))
				fill="#0b1220"
				stroke=move || color.get()
				stroke-width=attr(|g| num(g.stroke_width))
				opacity=attr(|g| num(g.opacity))
			/>
			<text
				x=attr(|g| num(g.label_at.x))
				y=attr(|g| num(g.label_at.y))
				text-anchor="middle"
				class="label label-use-case"
				fill=move || color.get()
				opacity=attr(|g| num(g.opacity))
			>
				{key.use_case.clone()}
			</text>
		</g>
	}
}
