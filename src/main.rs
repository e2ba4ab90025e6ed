//! Mounts the policy map app on the page body.

use leptos::prelude::*;
use rubi_map::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
