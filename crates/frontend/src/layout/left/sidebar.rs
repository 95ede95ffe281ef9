//! Sidebar navigation. Admin-only entries are hidden for other roles.

use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuItem {
    href: &'static str,
    label: &'static str,
    icon: &'static str,
    admin_only: bool,
}

const MENU: &[MenuItem] = &[
    MenuItem { href: "/", label: "Dashboard", icon: "dashboard", admin_only: false },
    MenuItem { href: "/charge-points", label: "Charge Points", icon: "charge-point", admin_only: false },
    MenuItem { href: "/transactions", label: "Transactions", icon: "transactions", admin_only: false },
    MenuItem { href: "/users", label: "Users", icon: "users", admin_only: true },
    MenuItem { href: "/id-tags", label: "ID Tags", icon: "id-tag", admin_only: true },
];

/// `/` is active only on itself; other entries also cover their sub-paths.
fn is_nav_active(current: &str, href: &str) -> bool {
    if href == "/" {
        return current == "/" || current.is_empty();
    }
    current == href
        || current
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn visible_items(is_admin: bool) -> impl Iterator<Item = &'static MenuItem> {
    MENU.iter().filter(move |item| is_admin || !item.admin_only)
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();

    view! {
        <nav class="app-sidebar__content">
            {move || {
                visible_items(auth.is_admin())
                    .map(|item| {
                        let href = item.href;
                        view! {
                            <A href=href attr:class="app-sidebar__link">
                                <div
                                    class="app-sidebar__item"
                                    class:app-sidebar__item--active=move || {
                                        location.pathname.with(|p| is_nav_active(p, href))
                                    }
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(item.icon)}
                                        <span>{item.label}</span>
                                    </div>
                                </div>
                            </A>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_active_only_on_root() {
        assert!(is_nav_active("/", "/"));
        assert!(!is_nav_active("/transactions", "/"));
    }

    #[test]
    fn sections_cover_sub_paths() {
        assert!(is_nav_active("/charge-points", "/charge-points"));
        assert!(is_nav_active("/charge-points/7", "/charge-points"));
        assert!(!is_nav_active("/charge-points-old", "/charge-points"));
    }

    #[test]
    fn admin_entries_hidden_for_operators() {
        let operator: Vec<_> = visible_items(false).map(|i| i.href).collect();
        assert_eq!(operator, vec!["/", "/charge-points", "/transactions"]);
        assert_eq!(visible_items(true).count(), MENU.len());
    }
}
