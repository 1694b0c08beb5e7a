//! Integration tests for regenerating an existing sketch.

use slicegen::codegen::{CodeGenError, CodeGenerator, GenerationContext, TargetPlatform, TemplateStore};
use slicegen::config::Config;
use slicegen::models::Project;
use std::fs;
use std::path::Path;

mod fixtures;

use fixtures::*;

fn context<'a>(project: &'a Project, store: &'a TemplateStore, config: &Config) -> GenerationContext<'a> {
    GenerationContext::from_config(project, store, config)
}

fn generate(project: &Project, config: &Config, existing: Option<&str>) -> Result<String, CodeGenError> {
    let store = TemplateStore::load(None).expect("built-in templates");
    CodeGenerator::new().generate(&context(project, &store, config), existing)
}

/// Lines of the case labelled `case_label`, up to its `break;`.
fn case_lines(text: &str, case_label: &str) -> Vec<String> {
    text.lines()
        .skip_while(|l| l.trim() != case_label)
        .take_while(|l| l.trim() != "break;")
        .map(|l| l.trim().to_string())
        .collect()
}

#[test]
fn test_regeneration_is_byte_identical() {
    let (config, _temp) = temp_config();
    let project = test_project_basic();

    let first = generate(&project, &config, None).unwrap();
    let second = generate(&project, &config, Some(&first)).unwrap();
    let third = generate(&project, &config, Some(&second)).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn test_fresh_output_structure() {
    let (config, _temp) = temp_config();
    let text = generate(&test_project_basic(), &config, None).unwrap();

    assert!(text.contains("// FILE: [demo.ino]"));
    assert!(text.contains("#include \"elem/XSlider.h\""));
    assert!(text.contains("enum {E_PG_MAIN,E_PG_SETTINGS};"));
    assert!(text.contains("bool CbBtnCommon("));
    assert!(text.contains("bool CbSlidePos("));
    assert_eq!(
        case_lines(&text, "case E_ELEM_TEXTBUTTON1:"),
        vec!["case E_ELEM_TEXTBUTTON1:", "gslc_SetPageCur(&m_gui, E_PG_SETTINGS);"]
    );
}

#[test]
fn test_removed_slider_drops_its_case() {
    let (config, _temp) = temp_config();
    let first = generate(&test_project_basic(), &config, None).unwrap();
    assert!(first.contains("case E_ELEM_SLIDER1:"));

    let second = generate(&test_project_without_slider(), &config, Some(&first)).unwrap();

    assert!(!second.contains("E_ELEM_SLIDER1"));
    assert!(second.contains("case E_ELEM_TEXTBUTTON1:"));
    // the slider callback function itself stays for later use
    assert!(second.contains("bool CbSlidePos("));
}

#[test]
fn test_changed_jump_is_patched_and_user_code_kept() {
    let (config, _temp) = temp_config();
    let first = generate(&test_project_basic(), &config, None).unwrap();
    let edited = first.replacen(
        "      case E_ELEM_TEXTBUTTON1:\n",
        "      case E_ELEM_TEXTBUTTON1:\n        saveSettings();\n",
        1,
    );
    assert_ne!(edited, first);

    let second = generate(&test_project_with_jump("E_PG_ABOUT"), &config, Some(&edited)).unwrap();

    assert_eq!(
        case_lines(&second, "case E_ELEM_TEXTBUTTON1:"),
        vec![
            "case E_ELEM_TEXTBUTTON1:",
            "saveSettings();",
            "gslc_SetPageCur(&m_gui, E_PG_ABOUT);",
        ]
    );
}

#[test]
fn test_edited_case_rebuilt_without_round_trip() {
    let (mut config, _temp) = temp_config();
    let first = generate(&test_project_basic(), &config, None).unwrap();
    let edited = first.replacen(
        "      case E_ELEM_TEXTBUTTON1:\n",
        "      case E_ELEM_TEXTBUTTON1:\n        saveSettings();\n",
        1,
    );

    config.generation.round_trip = false;
    let second = generate(&test_project_basic(), &config, Some(&edited)).unwrap();

    assert!(!second.contains("saveSettings();"));
    assert_eq!(second, first);
}

#[test]
fn test_missing_tag_leaves_file_untouched() {
    let (config, temp) = temp_config();
    let project = test_project_basic();
    let store = TemplateStore::load(None).unwrap();
    let ctx = context(&project, &store, &config);
    let path = temp.path().join("demo.ino");

    let generated = CodeGenerator::new().generate_file(&ctx, &path, true).unwrap();
    let broken: String = generated
        .lines()
        .filter(|l| !l.starts_with("//<Enum !Start!>"))
        .map(|l| format!("{l}\n"))
        .collect();
    fs::write(&path, &broken).unwrap();

    let err = CodeGenerator::new().generate_file(&ctx, &path, true).unwrap_err();

    assert!(err.is_corruption());
    assert!(matches!(err, CodeGenError::MissingTag { ref tag, .. } if tag == "//<Enum !Start!>"));
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    assert!(!temp.path().join("demo.ino.bak").exists());
}

#[test]
fn test_missing_font_is_logged_and_nothing_written() {
    let (config, temp) = temp_config();
    let project = test_project_with_missing_font();
    let store = TemplateStore::load(None).unwrap();
    let ctx = context(&project, &store, &config);
    let path = temp.path().join("demo.ino");

    let err = CodeGenerator::new().generate_file(&ctx, &path, true).unwrap_err();

    match err {
        CodeGenError::AssetErrors { count, ref log_file } => {
            assert_eq!(count, 1);
            let log = fs::read_to_string(log_file).unwrap();
            assert!(log.contains("missing font file: FreeSans9pt7b needs"));
            assert!(log.contains("FreeSans9pt7b.h"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_font_present_generates() {
    let (config, temp) = temp_config();
    let font_dir = config.paths.font_dir.clone().unwrap();
    fs::create_dir_all(font_dir.join("Fonts")).unwrap();
    fs::write(font_dir.join("Fonts/FreeSans9pt7b.h"), "").unwrap();

    let text = generate(&test_project_with_missing_font(), &config, None).unwrap();

    assert!(text.contains("#include \"Fonts/FreeSans9pt7b.h\""));
    assert!(text.contains("E_FREESANS9"));
    assert!(!temp.path().join("logs").join("slicegen.log").exists());
}

#[test]
fn test_generate_file_keeps_backup() {
    let (config, temp) = temp_config();
    let store = TemplateStore::load(None).unwrap();
    let path = temp.path().join("demo.ino");

    let basic = test_project_basic();
    let first = CodeGenerator::new()
        .generate_file(&context(&basic, &store, &config), &path, true)
        .unwrap();
    assert!(!temp.path().join("demo.ino.bak").exists());

    let without = test_project_without_slider();
    let second = CodeGenerator::new()
        .generate_file(&context(&without, &store, &config), &path, true)
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), second);
    assert_eq!(fs::read_to_string(temp.path().join("demo.ino.bak")).unwrap(), first);
}

#[test]
fn test_linux_target_uses_c_skeleton() {
    let (mut config, _temp) = temp_config();
    config.generation.target = TargetPlatform::Linux;
    let text = generate(&test_project_basic(), &config, None).unwrap();

    assert!(text.contains("// FILE: [demo.c]"));
    assert!(text.contains("int main("));
    assert!(!text.contains("void setup()"));
}

#[test]
fn test_template_dir_override() {
    let (mut config, temp) = temp_config();
    let dir = temp.path().join("templates");
    fs::create_dir_all(&dir).unwrap();
    let store = TemplateStore::load(None).unwrap();
    let custom = fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/ino.t"))
        .unwrap()
        .replace("void loop()", "void loop() /* custom */");
    fs::write(dir.join("ino.t"), custom).unwrap();
    config.paths.template_dir = Some(dir.clone());

    let project = test_project_basic();
    let text = CodeGenerator::new()
        .with_template_dir(Some(dir))
        .generate(&context(&project, &store, &config), None)
        .unwrap();

    assert!(text.contains("void loop() /* custom */"));
}

#[test]
fn test_crlf_file_regenerates_unchanged() {
    let (config, temp) = temp_config();
    let project = test_project_basic();
    let store = TemplateStore::load(None).unwrap();
    let ctx = context(&project, &store, &config);
    let path = temp.path().join("demo.ino");

    let lf = generate(&project, &config, None).unwrap();
    let crlf = lf.replace('\n', "\r\n");
    fs::write(&path, &crlf).unwrap();

    let regenerated = CodeGenerator::new().generate_file(&ctx, &path, true).unwrap();

    assert_eq!(regenerated, crlf);
    assert_eq!(fs::read_to_string(&path).unwrap(), crlf);
    assert!(!temp.path().join("demo.ino.bak").exists());
}

#[test]
fn test_hand_edited_plain_button_survives() {
    let (config, _temp) = temp_config();
    let project = test_project_with_inputs();
    let first = generate(&project, &config, None).unwrap();
    let edited = first.replacen(
        "      case E_ELEM_TEXTBUTTON2:\n",
        "      case E_ELEM_TEXTBUTTON2:\n        gslc_SetPageCur(&m_gui, E_PG_SETTINGS);\n",
        1,
    );
    assert_ne!(edited, first);

    let second = generate(&project, &config, Some(&edited)).unwrap();

    assert_eq!(second, edited);
    assert_eq!(
        case_lines(&second, "case E_ELEM_TEXTBUTTON2:"),
        vec!["case E_ELEM_TEXTBUTTON2:", "gslc_SetPageCur(&m_gui, E_PG_SETTINGS);"]
    );
}

#[test]
fn test_inputs_get_keypad_callback_cases() {
    let (config, _temp) = temp_config();
    let text = generate(&test_project_with_inputs(), &config, None).unwrap();

    assert!(text.contains("bool CbKeypad(void* pvGui, void *pvElemRef, int16_t nState, void* pvData)"));
    assert!(text.contains("gslc_ElemXKeyPadInputGet(pGui, m_pElemVal1, pvData);"));
    assert!(text.contains("//<Keypad Enums !Start!>"));
    // no listbox, so its placeholder stays empty
    assert!(text.contains("//<Listbox Callback !Start!>"));
    assert!(!text.contains("bool CbListbox("));

    let again = generate(&test_project_with_inputs(), &config, Some(&text)).unwrap();
    assert_eq!(again, text);
}

#[test]
fn test_linux_image_uses_path_storage() {
    let (mut config, _temp) = temp_config();
    config.generation.target = TargetPlatform::Linux;
    let text = generate(&test_project_with_image(), &config, None).unwrap();

    assert!(text.contains("m_strImgPath1[MAX_PATH];"));
    assert!(text.contains(r#"snprintf(m_strImgPath1,MAX_PATH,"%s/%s",m_strAppDir,IMG_LOGO);"#));
    assert!(text.contains("gslc_GetImageFromFile(m_strImgPath1,"));
}

#[test]
fn test_flash_build_uses_progmem_constructors() {
    let (mut config, _temp) = temp_config();
    config.generation.use_flash = true;
    let text = generate(&test_project_basic(), &config, None).unwrap();

    assert!(text.contains("gslc_ElemCreateBtnTxt_P(&m_gui,E_ELEM_TEXTBUTTON1,E_PG_MAIN,"));
    assert!(text.contains("gslc_ElemXSliderCreate_P(&m_gui,E_ELEM_SLIDER1,E_PG_MAIN,"));
    assert!(text.contains("m_pSlider1 = pElemRef;"));
    assert!(text.contains("#define MAX_ELEM_PG_MAIN_RAM 0 // # Elems in RAM"));
    assert!(!text.contains("m_sXSlider1;"));

    let again = generate(&test_project_basic(), &config, Some(&text)).unwrap();
    assert_eq!(again, text);
}
