// tests/exec_tools.rs

//! Command template rendering and exit-status mapping.

use patternpipe::errors::PipelineError;
use patternpipe::exec::ToolCommand;

#[test]
fn renders_every_placeholder() {
    let tool = ToolCommand::new("sass", "sass {src}:{dest} --load-path {src}");
    let rendered = tool.render(&[("src", "source/css"), ("dest", "public/css")]);
    assert_eq!(rendered, "sass source/css:public/css --load-path source/css");
}

#[test]
fn unknown_placeholders_are_left_verbatim() {
    let tool = ToolCommand::new("bundle", "esbuild {src} --outfile={dest}");
    let rendered = tool.render(&[("src", "source/js")]);
    assert_eq!(rendered, "esbuild source/js --outfile={dest}");
}

#[cfg(unix)]
#[tokio::test]
async fn successful_command_is_ok() {
    let tool = ToolCommand::new("noop", "true");
    tool.run(&[]).await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn nonzero_exit_maps_to_tool_failure_with_code() {
    let tool = ToolCommand::new("sass", "exit 42");
    let err = tool.run(&[]).await.unwrap_err();
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::ToolFailed { tool, code }) => {
            assert_eq!(tool, "sass");
            assert_eq!(*code, 42);
        }
        other => panic!("expected ToolFailed, got {other:?}"),
    }
}
