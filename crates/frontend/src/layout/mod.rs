pub mod global_context;
pub mod left;
pub mod modal_service;
pub mod top_header;

pub use modal_service::{use_modal_state, Modal, ModalService};

use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +------------------------------+
/// |  Sidebar  |     Content      |
/// +------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />

            <div class="app-body">
                <left::Left>
                    <left::Sidebar />
                </left::Left>

                <main data-zone="center" class="app-main">
                    {children()}
                </main>
            </div>
        </div>
    }
}
