use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, error};

use crate::components::EventSubscription;
use crate::components::policy_map::{Catalog, DiagramConfig, PolicyMap};

fn window_width() -> Option<f64> {
	web_sys::window()?.inner_width().ok()?.as_f64()
}

/// Current window width, kept in sync with `resize`.
fn use_viewport_width() -> Signal<f64> {
	let width = RwSignal::new(window_width().unwrap_or(f64::INFINITY));
	let subscription = StoredValue::new_local(None::<EventSubscription>);

	Effect::new(move |_| {
		let Some(window) = web_sys::window() else {
			return;
		};
		let on_resize = move || {
			if let Some(w) = window_width() {
				width.set(w);
			}
		};
		subscription.set_value(EventSubscription::new(&window, "resize", on_resize));
	});

	width.read_only().into()
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let catalog = Catalog::builtin().map(Arc::new).map_err(|e| {
		error!("Failed to load policy map catalog: {e}");
		leptos::error::Error::from(e)
	});
	let viewport = use_viewport_width();

	let map = move || {
		catalog.clone().map(|catalog| {
			let base = catalog.layout.clone();
			let config = Memo::new(move |_| {
				let config = base.for_viewport(viewport.get());
				debug!("Canvas {}x{}", config.width, config.height);
				config
			});
			view! { <PolicyMap catalog=catalog config=config /> }
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="page">
				<header class="page-header">
					<span class="brand" aria-label="Retroactive UBI Home">"retroactiveubi.com"</span>
					<nav>
						<a href="/guidebook" class="header-link" aria-label="Open the Guidebook">"Guidebook"</a>
					</nav>
				</header>

				<h1>"Retroactive UBI: " <span class="accent">"Interactive Policy Map"</span></h1>
				<p class="intro">
					"Hover a policy node to reveal concrete " <strong>"PHC/FPP"</strong> " and "
					<strong>"RUBI"</strong>
					" use-cases. Click or tap any node for details; clicking a sub-node will focus it."
				</p>

				{map}

				<footer class="page-footer">
					"Built with privacy-first identity principles. Questions / collab: "
					<span class="underline">"hello@retroactiveubi.com"</span>
				</footer>
			</div>
		</ErrorBoundary>
	}
}
