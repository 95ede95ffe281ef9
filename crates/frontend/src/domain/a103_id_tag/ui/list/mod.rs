use std::cmp::Ordering;

use contracts::domain::IdTag;
use contracts::shared::api::ListParams;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::IdTagForm;
use crate::layout::use_modal_state;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::notification::use_notifications;
use crate::shared::components::ui::{StatusBadge, StatusKind};
use crate::shared::date_utils::format_expiry;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, create_sort_toggle, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::state::dashboard_store::use_dashboard_store;
use crate::system::auth::guard::RequireAdmin;

impl Searchable for IdTag {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.tag, filter) || self.owner_name().is_some_and(|n| contains_ci(n, filter))
    }
}

impl Sortable for IdTag {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "status" => self.status.cmp(&other.status),
            "owner" => self.owner_name().cmp(&other.owner_name()),
            "expiry" => self.expires_at().cmp(&other.expires_at()),
            _ => self.tag.to_lowercase().cmp(&other.tag.to_lowercase()),
        }
    }
}

#[component]
pub fn IdTagListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <IdTagList />
        </RequireAdmin>
    }
}

#[component]
fn IdTagList() -> impl IntoView {
    let store = use_dashboard_store();
    let notifications = use_notifications();

    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("tag".to_string());
    let sort_ascending = RwSignal::new(true);

    let form_open = use_modal_state();
    let editing = RwSignal::new(None::<u32>);
    let confirm_open = use_modal_state();
    let deleting = RwSignal::new(None::<(u32, String)>);

    let load_data = move || {
        spawn_local(async move {
            store.fetch_id_tags(ListParams::default()).await;
        });
    };
    load_data();
    // Owners for the form's select
    spawn_local(async move {
        store.fetch_users(ListParams::default()).await;
    });

    let loading = Signal::derive(move || store.id_tags.with(|s| s.loading));
    let users = Signal::derive(move || store.users.with(|s| s.items.clone()));

    let visible = move || {
        let items = store.id_tags.with(|s| s.items.clone());
        let mut items = filter_list(items, &search.get());
        sort_list(&mut items, &sort_field.get(), sort_ascending.get());
        items
    };

    let on_delete = move |_| {
        let Some((id, tag)) = deleting.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match store.delete_id_tag(id).await {
                Ok(()) => notifications.success(format!("ID tag {} deleted", tag)),
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
        <PageFrame page_id="a103_id_tag--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"ID Tags"</h1>
                    <Badge>{move || store.id_tags.with(|s| s.items.len()).to_string()}</Badge>
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
                {move || store.id_tags.with(|s| s.error.clone()).map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <div class="filter-panel">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v: String| search.set(v))
                        placeholder="Tag or owner..."
                    />
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("tag", "Tag")}
                                {header("status", "Status")}
                                {header("owner", "Owner")}
                                {header("expiry", "Expires")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=visible
                                key=|t| (t.id, t.tag.clone(), t.status.clone(), t.expiry_date, t.user_id)
                                children=move |t: IdTag| {
                                    let id = t.id;
                                    let tag_for_delete = t.tag.clone();
                                    let expired = t.is_expired(chrono::Utc::now());
                                    let owner = t.owner_name().unwrap_or("—").to_string();
                                    let expiry = format_expiry(t.expiry_date.as_ref());
                                    let status = t.status.clone();
                                    let tag = t.tag;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="table__mono">{tag}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <StatusBadge kind=StatusKind::IdTag status=status />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{owner}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <span class:text-error=expired>
                                                    {expiry}
                                                </span>
                                            </TableCell>
                                            <TableCell>
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
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        attr:title="Delete"
                                                        on_click=move |_| {
                                                            deleting.set(Some((id, tag_for_delete.clone())));
                                                            confirm_open.set(true);
                                                        }
                                                    >
                                                        {icon("delete")}
                                                    </Button>
                                                </Flex>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || !loading.get() && store.id_tags.with(|s| s.is_empty())>
                        <div class="table__empty">"No ID tags"</div>
                    </Show>
                </div>
            </div>

            <IdTagForm open=form_open editing=editing users=users />
            <ConfirmDialog
                open=confirm_open
                title="Delete ID tag"
                message=Signal::derive(move || {
                    deleting
                        .get()
                        .map(|(_, tag)| format!("Delete ID tag {}? This cannot be undone.", tag))
                        .unwrap_or_default()
                })
                on_confirm=Callback::new(on_delete)
            />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::User;

    fn tag(value: &str, owner: &str) -> IdTag {
        IdTag {
            tag: value.into(),
            user: Some(Box::new(User {
                name: owner.into(),
                ..Default::default()
            })),
            ..Default::default()
        }
    }

    #[test]
    fn search_matches_tag_and_owner() {
        let items = vec![tag("AA11", "Budi"), tag("BB22", "Sari")];
        assert_eq!(filter_list(items.clone(), "sar").len(), 1);
        assert_eq!(filter_list(items, "aa1").len(), 1);
    }

    #[test]
    fn sort_by_owner() {
        let mut items = vec![tag("1", "Zed"), tag("2", "Ann")];
        sort_list(&mut items, "owner", true);
        assert_eq!(items[0].tag, "2");
    }
}
