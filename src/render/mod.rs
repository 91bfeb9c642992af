mod brush_frame;
mod path;

pub use brush_frame::{
    BrushFrameInput, BrushRenderFrame, FLIP_HANDLE_THRESHOLD_PX, HandleColors, HandleGeometry,
    HandleLabel,
};
pub use path::{
    HANDLE_HEAD_HEIGHT_PX, HANDLE_HEAD_OFFSET_PX, HANDLE_HEAD_WIDTH_PX, WEST_HANDLE_MIRROR,
    brush_handle_accent_path, brush_handle_path, text_width,
};
