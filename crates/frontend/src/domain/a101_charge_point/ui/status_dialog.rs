use contracts::enums::ChargePointStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::Modal;
use crate::shared::components::notification::use_notifications;
use crate::state::dashboard_store::use_dashboard_store;

/// Target of a status change: id, code and current status.
pub type StatusTarget = (u32, String, String);

/// Dialog for `PATCH /charge-points/{id}/status`.
#[component]
pub fn StatusDialog(
    open: RwSignal<bool>,
    #[prop(into)] target: Signal<Option<StatusTarget>>,
    #[prop(optional, into)] on_changed: Option<Callback<String>>,
) -> impl IntoView {
    let store = use_dashboard_store();
    let notifications = use_notifications();

    let status = RwSignal::new(ChargePointStatus::Available.code().to_string());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    // Preselect the current status when the dialog opens
    Effect::new(move |_| {
        if open.get() {
            if let Some((_, _, current)) = target.get_untracked() {
                if ChargePointStatus::from_code(&current).is_some() {
                    status.set(current);
                }
            }
            set_error.set(None);
        }
    });

    let on_save = move |_| {
        let Some((id, code, _)) = target.get_untracked() else {
            return;
        };
        let new_status = status.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            match store.update_charge_point_status(id, new_status.clone()).await {
                Ok(()) => {
                    notifications.success(format!("{} is now {}", code, new_status));
                    open.set(false);
                    if let Some(cb) = on_changed {
                        cb.run(new_status);
                    }
                }
                Err(e) => set_error.set(Some(format!("Status update failed: {}", e))),
            }
            set_saving.set(false);
        });
    };

    let title = Signal::derive(move || {
        target
            .get()
            .map(|(_, code, _)| format!("Change status: {}", code))
            .unwrap_or_else(|| "Change status".to_string())
    });

    view! {
        <Modal open=open title=title>
            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="form__group">
                    <Label>"Status"</Label>
                    <Select value=status>
                        {ChargePointStatus::all()
                            .into_iter()
                            .map(|s| view! { <option value=s.code()>{s.code()}</option> })
                            .collect_view()}
                    </Select>
                </div>
            </div>

            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| open.set(false)
                    disabled=Signal::derive(move || saving.get())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_save
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </Modal>
    }
}
