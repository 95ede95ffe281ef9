use contracts::domain::{IdTag, IdTagRequest, User};
use contracts::enums::IdTagStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a103_id_tag::api;
use crate::layout::Modal;
use crate::shared::components::notification::use_notifications;
use crate::shared::date_utils::{parse_input_date, to_input_date};
use crate::state::dashboard_store::use_dashboard_store;

/// Validate the form fields into a request body.
pub fn build_id_tag_request(
    tag: &str,
    status: &str,
    expiry: &str,
    user_id: &str,
) -> Result<IdTagRequest, String> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err("Tag is required".to_string());
    }
    if IdTagStatus::from_code(status).is_none() {
        return Err(format!("Unknown status: {}", status));
    }
    let expiry_date = if expiry.trim().is_empty() {
        None
    } else {
        Some(parse_input_date(expiry).ok_or_else(|| "Expiry date is invalid".to_string())?)
    };
    let user_id = user_id
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| "Owner is required".to_string())?;

    Ok(IdTagRequest {
        tag: tag.to_string(),
        status: status.to_string(),
        expiry_date,
        user_id,
    })
}

/// Create / edit dialog. `editing` holds the id of the tag being edited.
#[component]
pub fn IdTagForm(
    open: RwSignal<bool>,
    #[prop(into)] editing: Signal<Option<u32>>,
    #[prop(into)] users: Signal<Vec<User>>,
) -> impl IntoView {
    let store = use_dashboard_store();
    let notifications = use_notifications();

    let tag = RwSignal::new(String::new());
    let status = RwSignal::new(IdTagStatus::Accepted.code().to_string());
    let expiry = RwSignal::new(String::new());
    let user_id = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let fill = move |t: &IdTag| {
        tag.set(t.tag.clone());
        status.set(t.status.clone());
        expiry.set(to_input_date(t.expiry_date.as_ref()));
        user_id.set(t.user_id.to_string());
    };

    // Reset on open; edits are prefilled from GET /id-tags/{id}
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        set_error.set(None);
        set_saving.set(false);
        match editing.get_untracked() {
            None => fill(&IdTag {
                status: IdTagStatus::Accepted.code().to_string(),
                ..Default::default()
            }),
            Some(id) => {
                spawn_local(async move {
                    match api::get_id_tag(id).await {
                        Ok(t) => fill(&t),
                        Err(e) => {
                            log::error!("Error fetching ID tag {}: {}", id, e);
                            set_error.set(Some(e.to_string()));
                        }
                    }
                });
            }
        }
    });

    let on_save = move |_| {
        let request = match build_id_tag_request(
            &tag.get_untracked(),
            &status.get_untracked(),
            &expiry.get_untracked(),
            &user_id.get_untracked(),
        ) {
            Ok(r) => r,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        let editing_id = editing.get_untracked();
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => store.update_id_tag(id, request.clone()).await,
                None => store.create_id_tag(request.clone()).await,
            };
            match result {
                Ok(()) => {
                    notifications.success(format!("ID tag {} saved", request.tag));
                    open.set(false);
                }
                Err(e) => set_error.set(Some(format!("Save failed: {}", e))),
            }
            set_saving.set(false);
        });
    };

    let title = Signal::derive(move || match editing.get() {
        Some(_) => "Edit ID tag".to_string(),
        None => "New ID tag".to_string(),
    });

    view! {
        <Modal open=open title=title>
            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="form__group">
                    <Label>"Tag"</Label>
                    <Input value=tag placeholder="RFID UID" />
                </div>

                <div class="form__group">
                    <Label>"Status"</Label>
                    <Select value=status>
                        {IdTagStatus::all()
                            .into_iter()
                            .map(|s| view! { <option value=s.code()>{s.code()}</option> })
                            .collect_view()}
                    </Select>
                </div>

                <div class="form__group">
                    <Label>"Expiry date (empty = never)"</Label>
                    <Input value=expiry input_type=InputType::Date />
                </div>

                <div class="form__group">
                    <Label>"Owner"</Label>
                    <Select value=user_id>
                        <option value="">"-- Select user --"</option>
                        <For
                            each=move || users.get()
                            key=|u| u.id
                            children=move |u: User| {
                                let label = format!("{} ({})", u.display_name(), u.email);
                                view! { <option value=u.id.to_string()>{label}</option> }
                            }
                        />
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn valid_form_builds_request() {
        let request = build_id_tag_request(" TAG-1 ", "Accepted", "2026-12-31", "3").unwrap();
        assert_eq!(request.tag, "TAG-1");
        assert_eq!(request.status, "Accepted");
        assert_eq!(
            request.expiry_date,
            Some(Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap())
        );
        assert_eq!(request.user_id, 3);
    }

    #[test]
    fn empty_expiry_means_never() {
        let request = build_id_tag_request("TAG-1", "Blocked", "", "1").unwrap();
        assert_eq!(request.expiry_date, None);
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            build_id_tag_request("", "Accepted", "", "1"),
            Err("Tag is required".to_string())
        );
        assert_eq!(
            build_id_tag_request("T", "Accepted", "", ""),
            Err("Owner is required".to_string())
        );
        assert_eq!(
            build_id_tag_request("T", "Accepted", "31/12/2026", "1"),
            Err("Expiry date is invalid".to_string())
        );
        assert!(build_id_tag_request("T", "Whatever", "", "1").is_err());
    }
}
