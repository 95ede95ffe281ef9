use contracts::domain::{CreateUserRequest, UpdateUserRequest, User};
use contracts::enums::{UserRole, UserStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::Modal;
use crate::shared::components::notification::use_notifications;
use crate::state::dashboard_store::use_dashboard_store;
use crate::system::users::api;

/// Raw form fields as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: String,
    pub status: String,
}

/// Validated form, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum UserRequest {
    Create(CreateUserRequest),
    Update(u32, UpdateUserRequest),
}

/// A new account needs a password; on edit an empty password keeps the
/// current one.
pub fn build_user_request(fields: &UserFields, editing: Option<u32>) -> Result<UserRequest, String> {
    let name = fields.name.trim().to_string();
    let email = fields.email.trim().to_string();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    if !email.contains('@') {
        return Err("Email is invalid".to_string());
    }
    let role = UserRole::from_code(&fields.role)
        .ok_or_else(|| format!("Unknown role: {}", fields.role))?;
    let status = UserStatus::from_code(&fields.status)
        .ok_or_else(|| format!("Unknown status: {}", fields.status))?;
    let password = (!fields.password.is_empty()).then(|| fields.password.clone());
    let phone = fields.phone.trim().to_string();

    match editing {
        Some(id) => Ok(UserRequest::Update(
            id,
            UpdateUserRequest {
                name,
                email,
                password,
                phone,
                role: role.code().to_string(),
                status: status.code().to_string(),
            },
        )),
        None => Ok(UserRequest::Create(CreateUserRequest {
            name,
            email,
            password: password.ok_or_else(|| "Password is required".to_string())?,
            phone,
            role: role.code().to_string(),
            status: status.code().to_string(),
        })),
    }
}

#[component]
pub fn UserForm(open: RwSignal<bool>, #[prop(into)] editing: Signal<Option<u32>>) -> impl IntoView {
    let store = use_dashboard_store();
    let notifications = use_notifications();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let role = RwSignal::new(UserRole::Operator.code().to_string());
    let status = RwSignal::new(UserStatus::Active.code().to_string());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let fill = move |u: &User| {
        name.set(u.name.clone());
        email.set(u.email.clone());
        password.set(String::new());
        phone.set(u.phone.clone());
        role.set(u.role.clone());
        status.set(u.status.clone());
    };

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        set_error.set(None);
        set_saving.set(false);
        match editing.get_untracked() {
            None => fill(&User {
                role: UserRole::Operator.code().to_string(),
                status: UserStatus::Active.code().to_string(),
                ..Default::default()
            }),
            Some(id) => spawn_local(async move {
                match api::get_user(id).await {
                    Ok(u) => fill(&u),
                    Err(e) => {
                        log::error!("Error fetching user {}: {}", id, e);
                        set_error.set(Some(e.to_string()));
                    }
                }
            }),
        }
    });

    let on_save = move |_| {
        let fields = UserFields {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            phone: phone.get_untracked(),
            role: role.get_untracked(),
            status: status.get_untracked(),
        };
        let request = match build_user_request(&fields, editing.get_untracked()) {
            Ok(r) => r,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match request {
                UserRequest::Create(body) => store.create_user(body).await,
                UserRequest::Update(id, body) => store.update_user(id, body).await,
            };
            match result {
                Ok(()) => {
                    notifications.success(format!("User {} saved", fields.name.trim()));
                    open.set(false);
                }
                Err(e) => set_error.set(Some(format!("Save failed: {}", e))),
            }
            set_saving.set(false);
        });
    };

    let title = Signal::derive(move || match editing.get() {
        Some(_) => "Edit user".to_string(),
        None => "New user".to_string(),
    });
    let password_hint = move || match editing.get() {
        Some(_) => "Password (empty = unchanged)",
        None => "Password",
    };

    view! {
        <Modal open=open title=title>
            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="form__group">
                    <Label>"Name"</Label>
                    <Input value=name />
                </div>
                <div class="form__group">
                    <Label>"Email"</Label>
                    <Input value=email input_type=InputType::Email />
                </div>
                <div class="form__group">
                    <Label>{password_hint}</Label>
                    <Input value=password input_type=InputType::Password />
                </div>
                <div class="form__group">
                    <Label>"Phone"</Label>
                    <Input value=phone />
                </div>
                <div class="form__row">
                    <div class="form__group">
                        <Label>"Role"</Label>
                        <Select value=role>
                            {UserRole::all()
                                .into_iter()
                                .map(|r| view! { <option value=r.code()>{r.display_name()}</option> })
                                .collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <Label>"Status"</Label>
                        <Select value=status>
                            {UserStatus::all()
                                .into_iter()
                                .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                                .collect_view()}
                        </Select>
                    </div>
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

    fn fields() -> UserFields {
        UserFields {
            name: " Rina ".into(),
            email: "rina@csms.local".into(),
            password: "secret".into(),
            phone: String::new(),
            role: "operator".into(),
            status: "active".into(),
        }
    }

    #[test]
    fn create_requires_password() {
        let mut f = fields();
        f.password.clear();
        assert_eq!(
            build_user_request(&f, None),
            Err("Password is required".to_string())
        );
    }

    #[test]
    fn create_trims_name() {
        match build_user_request(&fields(), None).unwrap() {
            UserRequest::Create(body) => {
                assert_eq!(body.name, "Rina");
                assert_eq!(body.password, "secret");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn update_with_empty_password_keeps_current() {
        let mut f = fields();
        f.password.clear();
        match build_user_request(&f, Some(7)).unwrap() {
            UserRequest::Update(id, body) => {
                assert_eq!(id, 7);
                assert_eq!(body.password, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_input() {
        let mut f = fields();
        f.email = "nope".into();
        assert!(build_user_request(&f, None).is_err());

        let mut f = fields();
        f.role = "root".into();
        assert_eq!(
            build_user_request(&f, None),
            Err("Unknown role: root".to_string())
        );
    }
}
