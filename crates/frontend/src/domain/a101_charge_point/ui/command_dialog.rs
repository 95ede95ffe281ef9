use contracts::domain::{CommandAck, RemoteCommandRequest};
use contracts::enums::RemoteCommandKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::Modal;
use crate::shared::components::notification::use_notifications;
use crate::state::dashboard_store::use_dashboard_store;

fn parse_number(field: &str, value: &str) -> Result<i32, String> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("{} must be a number", field))
}

/// Validate the dialog inputs for the selected command.
///
/// Only the fields the command needs are read; the rest are ignored.
pub fn build_command(
    kind_code: &str,
    connector: &str,
    id_tag: &str,
    transaction: &str,
) -> Result<RemoteCommandRequest, String> {
    let kind = RemoteCommandKind::from_code(kind_code)
        .ok_or_else(|| format!("Unknown command: {}", kind_code))?;
    let mut request = RemoteCommandRequest::new(kind);

    if kind.needs_connector() {
        let connector_id = parse_number("Connector", connector)?;
        if connector_id < 1 {
            return Err("Connector must be 1 or higher".to_string());
        }
        request = request.with_connector(connector_id);
    }
    if kind.needs_id_tag() {
        let tag = id_tag.trim();
        if tag.is_empty() {
            return Err("ID tag is required".to_string());
        }
        request = request.with_id_tag(tag);
    }
    if kind.needs_transaction() {
        request = request.with_transaction(parse_number("Transaction", transaction)?);
    }
    Ok(request)
}

/// Dialog that sends a remote command to one charge point.
#[component]
pub fn RemoteCommandDialog(
    open: RwSignal<bool>,
    /// Target charge point id and code
    #[prop(into)]
    target: Signal<Option<(u32, String)>>,
    #[prop(optional, into)] on_sent: Option<Callback<CommandAck>>,
) -> impl IntoView {
    let store = use_dashboard_store();
    let notifications = use_notifications();

    let command = RwSignal::new(RemoteCommandKind::Reset.code().to_string());
    let connector = RwSignal::new("1".to_string());
    let id_tag = RwSignal::new(String::new());
    let transaction = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (sending, set_sending) = signal(false);

    let selected_kind = move || RemoteCommandKind::from_code(&command.get());
    let needs = move |f: fn(&RemoteCommandKind) -> bool| selected_kind().map(|k| f(&k)).unwrap_or(false);

    // Fresh form for every opening
    Effect::new(move |_| {
        if open.get() {
            set_error.set(None);
            set_sending.set(false);
        }
    });

    let on_send = move |_| {
        let Some((cp_id, cp_code)) = target.get_untracked() else {
            return;
        };
        let request = match build_command(
            &command.get_untracked(),
            &connector.get_untracked(),
            &id_tag.get_untracked(),
            &transaction.get_untracked(),
        ) {
            Ok(r) => r,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };

        set_sending.set(true);
        set_error.set(None);
        spawn_local(async move {
            match store.send_remote_command(cp_id, request).await {
                Ok(ack) => {
                    notifications.success(format!("{} sent to {}", ack.command, cp_code));
                    open.set(false);
                    if let Some(cb) = on_sent {
                        cb.run(ack);
                    }
                }
                Err(e) => set_error.set(Some(format!("Command failed: {}", e))),
            }
            set_sending.set(false);
        });
    };

    let title = Signal::derive(move || {
        target
            .get()
            .map(|(_, code)| format!("Remote command: {}", code))
            .unwrap_or_else(|| "Remote command".to_string())
    });

    view! {
        <Modal open=open title=title>
            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="form__group">
                    <Label>"Command"</Label>
                    <Select value=command>
                        {RemoteCommandKind::all()
                            .into_iter()
                            .map(|k| view! { <option value=k.code()>{k.display_name()}</option> })
                            .collect_view()}
                    </Select>
                </div>

                <Show when=move || needs(RemoteCommandKind::needs_connector)>
                    <div class="form__group">
                        <Label>"Connector"</Label>
                        <Input value=connector input_type=InputType::Number />
                    </div>
                </Show>

                <Show when=move || needs(RemoteCommandKind::needs_id_tag)>
                    <div class="form__group">
                        <Label>"ID tag"</Label>
                        <Input value=id_tag placeholder="RFID tag value" />
                    </div>
                </Show>

                <Show when=move || needs(RemoteCommandKind::needs_transaction)>
                    <div class="form__group">
                        <Label>"Transaction id"</Label>
                        <Input value=transaction input_type=InputType::Number />
                    </div>
                </Show>
            </div>

            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| open.set(false)
                    disabled=Signal::derive(move || sending.get())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_send
                    disabled=Signal::derive(move || sending.get())
                >
                    {move || if sending.get() { "Sending..." } else { "Send" }}
                </Button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_needs_no_arguments() {
        let request = build_command("Reset", "", "", "").unwrap();
        assert_eq!(request, RemoteCommandRequest::new(RemoteCommandKind::Reset));
    }

    #[test]
    fn start_transaction_requires_connector_and_tag() {
        let request = build_command("RemoteStartTransaction", " 2 ", "TAG-01", "").unwrap();
        assert_eq!(request.connector_id, Some(2));
        assert_eq!(request.id_tag.as_deref(), Some("TAG-01"));
        assert_eq!(request.transaction_id, None);

        assert_eq!(
            build_command("RemoteStartTransaction", "1", "  ", ""),
            Err("ID tag is required".to_string())
        );
        assert_eq!(
            build_command("RemoteStartTransaction", "0", "TAG", ""),
            Err("Connector must be 1 or higher".to_string())
        );
    }

    #[test]
    fn stop_transaction_requires_numeric_id() {
        let request = build_command("RemoteStopTransaction", "", "", "42").unwrap();
        assert_eq!(request.transaction_id, Some(42));
        assert_eq!(
            build_command("RemoteStopTransaction", "", "", "abc"),
            Err("Transaction must be a number".to_string())
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(build_command("Explode", "", "", "").is_err());
    }
}
