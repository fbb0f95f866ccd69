//! Integration tests for building a template through the wizard

use pretty_assertions::assert_eq;

use wa_templates::model::{ButtonField, ButtonType, ModelError};
use wa_templates::wizard::WizardError;
use wa_templates::{Category, EditorSession, Template, TemplateAction, Wizard, WizardStep};

fn edit(session: &mut EditorSession, action: TemplateAction) {
    session.dispatch(action).expect("action should apply");
}

#[test]
fn test_build_authentication_template_step_by_step() {
    let mut session = EditorSession::default();
    assert_eq!(session.step(), WizardStep::Details);
    assert!(!session.can_advance());

    edit(&mut session, TemplateAction::SetName("login_code".into()));
    edit(&mut session, TemplateAction::SetLanguage("en".into()));
    edit(&mut session, TemplateAction::SetCategory(Category::Authentication));
    assert_eq!(session.advance(), Ok(WizardStep::Content));

    edit(
        &mut session,
        TemplateAction::SetBodyText(
            "Your verification code is {{1}}. It expires in 10 minutes.".into(),
        ),
    );
    assert!(session.validation().has_error("body.examples"));
    edit(
        &mut session,
        TemplateAction::SetBodyExample {
            index: 0,
            value: "482913".into(),
        },
    );
    assert_eq!(session.advance(), Ok(WizardStep::Buttons));

    edit(&mut session, TemplateAction::AddButton);
    edit(
        &mut session,
        TemplateAction::SetButtonField {
            index: 0,
            field: ButtonField::Type(ButtonType::CopyCode),
        },
    );
    edit(
        &mut session,
        TemplateAction::SetButtonField {
            index: 0,
            field: ButtonField::Text("Copy code".into()),
        },
    );
    assert!(session.validation().has_error("buttons.items.0.example"));
    edit(
        &mut session,
        TemplateAction::SetButtonField {
            index: 0,
            field: ButtonField::Example(Some("482913".into())),
        },
    );
    assert_eq!(session.advance(), Ok(WizardStep::Review));
    assert!(session.can_submit());

    let mut expected = Template::from_json(include_str!("fixtures/login_code.json")).unwrap();
    expected.id = None;
    assert_eq!(session.template(), &expected);
}

#[test]
fn test_cannot_skip_ahead_or_submit_early() {
    let template = Template::from_json(include_str!("fixtures/spring_sale.json")).unwrap();
    let mut wizard = Wizard::default();

    assert_eq!(
        wizard.go_to(WizardStep::Review),
        Err(WizardError::NotVisited {
            current: WizardStep::Details,
            requested: WizardStep::Review,
        })
    );
    assert!(matches!(
        wizard.submit(&template),
        Err(WizardError::NotAtReview { .. })
    ));

    wizard.advance(&template).unwrap();
    wizard.advance(&template).unwrap();
    assert_eq!(wizard.back(), WizardStep::Content);
    assert_eq!(wizard.go_to(WizardStep::Details), Ok(WizardStep::Details));
}

#[test]
fn test_invalid_step_blocks_advance() {
    let template = Template::from_json(include_str!("fixtures/broken.json")).unwrap();
    let mut wizard = Wizard::default();
    match wizard.advance(&template) {
        Err(WizardError::StepInvalid { step, errors }) => {
            assert_eq!(step, WizardStep::Details);
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected StepInvalid, got {:?}", other),
    }
    assert_eq!(wizard.current(), WizardStep::Details);
}

#[test]
fn test_draft_saves_without_validation() {
    let template = Template::from_json(include_str!("fixtures/broken.json")).unwrap();
    let draft = Wizard::default().save_draft(&template);
    assert_eq!(draft.step, WizardStep::Details);
    assert_eq!(draft.template, template);
}

#[test]
fn test_created_template_name_is_locked() {
    let template = Template::from_json(include_str!("fixtures/login_code.json")).unwrap();
    let mut session = EditorSession::new(template, Wizard::default());

    let err = session
        .dispatch(TemplateAction::SetName("renamed".into()))
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::NameLocked {
            name: "login_code".into()
        }
    );
    edit(&mut session, TemplateAction::SetLanguage("en_GB".into()));
    assert_eq!(session.template().name, "login_code");
}

#[test]
fn test_undo_restores_previous_snapshot() {
    let template = Template::from_json(include_str!("fixtures/spring_sale.json")).unwrap();
    let mut session = EditorSession::new(template.clone(), Wizard::default());

    edit(&mut session, TemplateAction::RemoveButton(0));
    edit(&mut session, TemplateAction::RemoveButton(0));
    assert!(session.template().active_buttons().is_empty());

    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.template(), &template);
}
