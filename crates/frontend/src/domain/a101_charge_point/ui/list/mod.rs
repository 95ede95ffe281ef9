use std::cmp::Ordering;

use contracts::domain::ChargePoint;
use contracts::enums::ChargePointStatus;
use contracts::shared::api::ListParams;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::command_dialog::RemoteCommandDialog;
use super::status_dialog::{StatusDialog, StatusTarget};
use crate::layout::use_modal_state;
use crate::shared::components::ui::{StatusBadge, StatusKind};
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, create_sort_toggle, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::state::dashboard_store::use_dashboard_store;

impl Searchable for ChargePoint {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.charge_point_code, filter)
            || contains_ci(&self.charge_point_vendor, filter)
            || contains_ci(&self.charge_point_model, filter)
            || contains_ci(&self.charge_point_serial_number, filter)
    }
}

impl Sortable for ChargePoint {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "vendor" => self
                .charge_point_vendor
                .to_lowercase()
                .cmp(&other.charge_point_vendor.to_lowercase()),
            "status" => self.status.cmp(&other.status),
            "last_heartbeat" => self.last_heartbeat.cmp(&other.last_heartbeat),
            "connectors" => self.connectors.len().cmp(&other.connectors.len()),
            _ => self
                .charge_point_code
                .to_lowercase()
                .cmp(&other.charge_point_code.to_lowercase()),
        }
    }
}

/// Empty filter keeps everything.
pub fn matches_status(cp: &ChargePoint, status_filter: &str) -> bool {
    status_filter.is_empty() || cp.status == status_filter
}

#[component]
pub fn ChargePointList() -> impl IntoView {
    let store = use_dashboard_store();
    let navigate = use_navigate();

    let search = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());
    let sort_field = RwSignal::new("code".to_string());
    let sort_ascending = RwSignal::new(true);

    let status_open = use_modal_state();
    let status_target = RwSignal::new(None::<StatusTarget>);
    let command_open = use_modal_state();
    let command_target = RwSignal::new(None::<(u32, String)>);

    let load_data = move || {
        spawn_local(async move {
            store.fetch_charge_points(ListParams::default()).await;
        });
    };
    load_data();

    let loading = Signal::derive(move || store.charge_points.with(|s| s.loading));

    let visible = move || {
        let mut items = store.charge_points.with(|s| s.items.clone());
        let status = status_filter.get();
        items.retain(|cp| matches_status(cp, &status));
        let mut items = filter_list(items, &search.get());
        sort_list(&mut items, &sort_field.get(), sort_ascending.get());
        items
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
        <PageFrame page_id="a101_charge_point--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Charge Points"</h1>
                    <Badge>
                        {move || store.charge_points.with(|s| s.items.len()).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
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
                {move || store.charge_points.with(|s| s.error.clone()).map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |v: String| search.set(v))
                            placeholder="Code, vendor, model or serial..."
                        />
                        <Select value=status_filter>
                            <option value="">"All statuses"</option>
                            {ChargePointStatus::all()
                                .into_iter()
                                .map(|s| view! { <option value=s.code()>{s.code()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("code", "Code")}
                                {header("vendor", "Vendor / model")}
                                {header("status", "Status")}
                                {header("connectors", "Connectors")}
                                <TableHeaderCell>"Firmware"</TableHeaderCell>
                                {header("last_heartbeat", "Last heartbeat")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=visible
                                key=|cp| (cp.id, cp.status.clone(), cp.last_heartbeat, cp.connectors.len())
                                children=move |cp: ChargePoint| {
                                    let id = cp.id;
                                    let code = cp.charge_point_code.clone();
                                    let current_status = cp.status.clone();
                                    let vendor = format!("{} {}", cp.charge_point_vendor, cp.charge_point_model);
                                    let heartbeat = format_timestamp(cp.last_heartbeat.as_ref());
                                    let connectors = cp.connectors.len();
                                    let firmware = cp.firmware_version;
                                    let navigate = navigate.clone();
                                    let code_for_status = code.clone();
                                    let code_for_command = code.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |ev| {
                                                            ev.prevent_default();
                                                            navigate(&format!("/charge-points/{}", id), Default::default());
                                                        }
                                                    >
                                                        {code}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{vendor}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <StatusBadge kind=StatusKind::ChargePoint status=cp.status />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{connectors}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{firmware}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{heartbeat}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        attr:title="Change status"
                                                        on_click=move |_| {
                                                            status_target.set(Some((id, code_for_status.clone(), current_status.clone())));
                                                            status_open.set(true);
                                                        }
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        attr:title="Remote command"
                                                        on_click=move |_| {
                                                            command_target.set(Some((id, code_for_command.clone())));
                                                            command_open.set(true);
                                                        }
                                                    >
                                                        {icon("bolt")}
                                                    </Button>
                                                </Flex>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || !loading.get() && store.charge_points.with(|s| s.is_empty())>
                        <div class="table__empty">"No charge points registered yet"</div>
                    </Show>
                </div>
            </div>

            <StatusDialog open=status_open target=status_target />
            <RemoteCommandDialog open=command_open target=command_target />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(code: &str, vendor: &str, status: &str) -> ChargePoint {
        ChargePoint {
            charge_point_code: code.into(),
            charge_point_vendor: vendor.into(),
            status: status.into(),
            ..Default::default()
        }
    }

    #[test]
    fn status_filter() {
        let item = cp("CP-1", "ABB", "Charging");
        assert!(matches_status(&item, ""));
        assert!(matches_status(&item, "Charging"));
        assert!(!matches_status(&item, "Available"));
    }

    #[test]
    fn search_covers_code_and_vendor() {
        let items = vec![cp("CP-001", "ABB", "Available"), cp("CP-002", "Kempower", "Faulted")];
        assert_eq!(filter_list(items.clone(), "kemp").len(), 1);
        assert_eq!(filter_list(items, "cp-00").len(), 2);
    }

    #[test]
    fn sorts_by_code_case_insensitive() {
        let mut items = vec![cp("cp-b", "", ""), cp("CP-A", "", "")];
        sort_list(&mut items, "code", true);
        assert_eq!(items[0].charge_point_code, "CP-A");
    }
}
