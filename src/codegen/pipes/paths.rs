//! Image path buffers for the Linux target.
//!
//! `gslc_GetImageFromFile` keeps the path pointer it is given, so each
//! file-based image needs a global buffer that outlives `InitGUI`. The
//! buffers are filled from the executable directory before each image is
//! created.

use super::{fill_region, macros, Pipe};
use crate::codegen::context::{GenerationContext, TargetPlatform};
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::AssetReport;
use crate::codegen::tags;
use crate::models::WidgetKind;

/// Path buffers for images loaded from files.
pub struct PathStoragePipe;

impl Pipe for PathStoragePipe {
    fn name(&self) -> &'static str {
        tags::PATH_STORAGE
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        if ctx.target != TargetPlatform::Linux {
            return Ok(());
        }
        let mut body = Vec::new();
        for (_, widget) in ctx.project.widgets() {
            let fragment = match &widget.kind {
                WidgetKind::Image(p) if p.source.is_file() => "<IMAGE_PATH>",
                WidgetKind::ImgButton(p) if p.source.is_file() => "<IMGBUTTON_PATH>",
                _ => continue,
            };
            let map = macros([("COUNT", widget.key_count().to_string())]);
            body.extend(ctx.expand(fragment, &map)?);
        }
        fill_region(doc, tags::PATH_STORAGE, body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::codegen::CodeGenError;
    use crate::models::{ImageProps, ImageSource, ImgButtonProps, WidgetModel};

    fn images() -> Vec<WidgetModel> {
        let file = ImageSource {
            define: "IMG_LOGO".to_string(),
            file: "logo.bmp".to_string(),
            ..ImageSource::default()
        };
        vec![
            WidgetModel::new(
                "Image$1",
                "E_ELEM_IMAGE1",
                (0, 0, 1, 1),
                WidgetKind::Image(ImageProps {
                    source: file.clone(),
                    ..ImageProps::default()
                }),
            ),
            WidgetModel::new(
                "Image$2",
                "E_ELEM_IMAGE2",
                (0, 0, 1, 1),
                WidgetKind::Image(ImageProps {
                    source: ImageSource {
                        extern_name: Some("logo_bmp".to_string()),
                        ..ImageSource::default()
                    },
                    ..ImageProps::default()
                }),
            ),
            WidgetModel::new(
                "ImageButton$3",
                "E_ELEM_IMAGEBTN3",
                (0, 0, 1, 1),
                WidgetKind::ImgButton(ImgButtonProps {
                    source: file,
                    selected_define: "IMG_LOGO_SEL".to_string(),
                    ..ImgButtonProps::default()
                }),
            ),
        ]
    }

    #[test]
    fn test_linux_file_images_get_buffers() {
        let project = project_of(images());
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store).with_target(TargetPlatform::Linux);
        assert_eq!(
            run_pipe(&PathStoragePipe, &ctx),
            vec![
                "char                            m_strImgPath1[MAX_PATH];",
                "char                            m_strImgBtnPath3[MAX_PATH];",
                "char                            m_strImgBtnSelPath3[MAX_PATH];",
            ]
        );
    }

    #[test]
    fn test_arduino_skips_path_storage() {
        let project = project_of(images());
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store);
        let mut doc = doc_with("File");
        PathStoragePipe
            .process(&ctx, &mut doc, &mut AssetReport::new())
            .unwrap();
        assert!(!doc.contains_region(tags::PATH_STORAGE));
    }

    #[test]
    fn test_linux_requires_the_region() {
        let project = project_of(vec![]);
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store).with_target(TargetPlatform::Linux);
        let mut doc = doc_with("File");
        let err = PathStoragePipe
            .process(&ctx, &mut doc, &mut AssetReport::new())
            .unwrap_err();
        assert!(matches!(err, CodeGenError::MissingTag { ref tag, .. } if tag == "//<PathStorage !Start!>"));
    }
}
