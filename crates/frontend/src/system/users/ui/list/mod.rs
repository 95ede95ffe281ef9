use std::cmp::Ordering;

use contracts::domain::{IdTag, User};
use contracts::shared::api::ListParams;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a103_id_tag::api as id_tag_api;
use crate::layout::use_modal_state;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::notification::use_notifications;
use crate::shared::components::ui::{StatusBadge, StatusKind};
use crate::shared::date_utils::{format_expiry, format_timestamp};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, create_sort_toggle, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::state::dashboard_store::use_dashboard_store;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireAdmin;
use crate::system::users::ui::details::UserForm;

impl Searchable for User {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || contains_ci(&self.email, filter)
            || contains_ci(&self.phone, filter)
    }
}

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "email" => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
            "role" => self.role.cmp(&other.role),
            "status" => self.status.cmp(&other.status),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => self
                .display_name()
                .to_lowercase()
                .cmp(&other.display_name().to_lowercase()),
        }
    }
}

/// Display text of one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub created: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            name: u.display_name().to_string(),
            email: u.email.clone(),
            role: u.role.clone(),
            status: u.status.clone(),
            created: format_timestamp(u.created_at.as_ref()),
        }
    }
}

/// The signed-in admin cannot delete their own account.
pub fn can_delete(user_id: u32, current_user_id: Option<u32>) -> bool {
    current_user_id != Some(user_id)
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <UsersList />
        </RequireAdmin>
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let store = use_dashboard_store();
    let auth = use_auth();
    let notifications = use_notifications();

    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);

    let form_open = use_modal_state();
    let editing = RwSignal::new(None::<u32>);
    let confirm_open = use_modal_state();
    let deleting = RwSignal::new(None::<(u32, String)>);
    let selected = RwSignal::new(None::<User>);

    let load_data = move || {
        spawn_local(async move {
            store.fetch_users(ListParams::default()).await;
        });
    };
    load_data();

    let loading = Signal::derive(move || store.users.with(|s| s.loading));
    let current_user_id = move || auth.user.with(|u| u.as_ref().map(|u| u.id));

    let visible = move || {
        let items = store.users.with(|s| s.items.clone());
        let mut items = filter_list(items, &search.get());
        sort_list(&mut items, &sort_field.get(), sort_ascending.get());
        items
    };

    let on_delete = move |_| {
        let Some((id, name)) = deleting.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match store.delete_user(id).await {
                Ok(()) => {
                    if selected.with_untracked(|s| s.as_ref().map(|u| u.id)) == Some(id) {
                        selected.set(None);
                    }
                    notifications.success(format!("User {} deleted", name));
                }
                Err(e) => notifications.error(format!("Delete failed: {}", e)),
            }
        });
    };

    let header = move |field: &'static str, label: &'static str| {
        view! {
            <TableHeaderCell>
                <div class="table__sortable-header" on:click=create_sort_toggle(field, sort_field, sort_ascending)>
                    {label}
                    <span class="table__sort-indicator">
                        {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
                    </span>
                </div>
            </TableHeaderCell>
        }
    };

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Users"</h1>
                    <Badge>{move || store.users.with(|s| s.items.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| {
                            editing.set(None);
                            form_open.set(true);
                        }
                    >
                        {icon("plus")}
                        " New"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || store.users.with(|s| s.error.clone()).map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <div class="filter-panel">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v: String| search.set(v))
                        placeholder="Name, email or phone..."
                    />
                </div>

                <div class="split-view">
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    {header("name", "Name")}
                                    {header("email", "Email")}
                                    {header("role", "Role")}
                                    {header("status", "Status")}
                                    {header("created_at", "Created")}
                                    <TableHeaderCell>""</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=visible
                                    key=|u| (u.id, u.name.clone(), u.email.clone(), u.role.clone(), u.status.clone())
                                    children=move |u: User| {
                                        let id = u.id;
                                        let UserRow { name: name_cell, email: email_cell, role, status, created } =
                                            UserRow::from(&u);
                                        let delete_name = name_cell.clone();
                                        let row_user = u;
                                        let is_selected = move || {
                                            selected.with(|s| s.as_ref().map(|s| s.id)) == Some(id)
                                        };
                                        let deletable = move || can_delete(id, current_user_id());
                                        view! {
                                            <TableRow
                                                class:table__row--selected=is_selected
                                                on:click=move |_| selected.set(Some(row_user.clone()))
                                            >
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{name_cell}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{email_cell}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <StatusBadge kind=StatusKind::UserRole status=role />
                                                </TableCell>
                                                <TableCell>
                                                    <StatusBadge kind=StatusKind::UserStatus status=status />
                                                </TableCell>
                                                <TableCell>{created}</TableCell>
                                                <TableCell>
                                                    <div on:click=|e| e.stop_propagation()>
                                                        <Flex gap=FlexGap::Small>
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                attr:title="Edit"
                                                                on_click=move |_| {
                                                                    editing.set(Some(id));
                                                                    form_open.set(true);
                                                                }
                                                            >
                                                                {icon("edit")}
                                                            </Button>
                                                            <Show when=deletable>
                                                                {
                                                                    let name = delete_name.clone();
                                                                    view! {
                                                                        <Button
                                                                            appearance=ButtonAppearance::Subtle
                                                                            attr:title="Delete"
                                                                            on_click=move |_| {
                                                                                deleting.set(Some((id, name.clone())));
                                                                                confirm_open.set(true);
                                                                            }
                                                                        >
                                                                            {icon("delete")}
                                                                        </Button>
                                                                    }
                                                                }
                                                            </Show>
                                                        </Flex>
                                                    </div>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>

                        <Show when=move || !loading.get() && store.users.with(|s| s.is_empty())>
                            <div class="table__empty">"No users"</div>
                        </Show>
                    </div>

                    {move || selected.get().map(|user| view! { <UserTagsPanel user=user /> })}
                </div>
            </div>

            <UserForm open=form_open editing=editing />
            <ConfirmDialog
                open=confirm_open
                title="Delete user"
                message=Signal::derive(move || {
                    deleting
                        .get()
                        .map(|(_, name)| format!("Delete user {}? Their ID tags stay unassigned.", name))
                        .unwrap_or_default()
                })
                on_confirm=Callback::new(on_delete)
            />
        </PageFrame>
    }
}

/// ID tags owned by one user, fetched on demand.
#[component]
fn UserTagsPanel(user: User) -> impl IntoView {
    let tags = RwSignal::new(Vec::<IdTag>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let user_id = user.id;

    spawn_local(async move {
        match id_tag_api::get_id_tags_by_user(user_id).await {
            Ok(items) => tags.set(items),
            Err(e) => {
                log::error!("Error fetching ID tags of user {}: {}", user_id, e);
                set_error.set(Some(e.to_string()));
            }
        }
        set_loading.set(false);
    });

    view! {
        <Card class="user-tags">
            <CardHeader>
                <b>{format!("ID tags of {}", user.display_name())}</b>
            </CardHeader>
            <Show when=move || loading.get()>
                <Spinner />
            </Show>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <Show when=move || !loading.get() && error.get().is_none() && tags.with(|t| t.is_empty())>
                <div class="table__empty">"No ID tags"</div>
            </Show>
            <ul class="user-tags__list">
                <For
                    each=move || tags.get()
                    key=|t| t.id
                    children=|t: IdTag| {
                        view! {
                            <li class="user-tags__item">
                                <span class="table__mono">{t.tag.clone()}</span>
                                <StatusBadge kind=StatusKind::IdTag status=t.status.clone() />
                                <span class="user-tags__expiry">
                                    {format!("expires: {}", format_expiry(t.expiry_date.as_ref()))}
                                </span>
                            </li>
                        }
                    }
                />
            </ul>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u32, name: &str, email: &str) -> User {
        User {
            id,
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    #[test]
    fn row_text_falls_back_to_email() {
        let u = User {
            role: "admin".into(),
            status: "active".into(),
            ..user(3, "", "ops@csms.local")
        };
        let row = UserRow::from(&u);
        assert_eq!(row.name, "ops@csms.local");
        assert_eq!(row.email, "ops@csms.local");
        assert_eq!(row.role, "admin");
        assert_eq!(row.status, "active");
        assert_eq!(row.created, "—");
    }

    #[test]
    fn cannot_delete_self() {
        assert!(!can_delete(1, Some(1)));
        assert!(can_delete(2, Some(1)));
        assert!(can_delete(2, None));
    }

    #[test]
    fn search_checks_email() {
        let items = vec![user(1, "Ana", "ana@csms.local"), user(2, "Budi", "budi@fleet.io")];
        let found = filter_list(items, "fleet");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn sort_by_name_falls_back_to_email() {
        let mut items = vec![user(1, "Zoe", "z@x.io"), user(2, "", "adam@x.io")];
        sort_list(&mut items, "name", true);
        assert_eq!(items[0].id, 2);
    }
}
