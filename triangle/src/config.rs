use backend::logging::LoggingConfig;
use backend::math::Vec3;
use backend::renderer::SceneDesc;
use backend::shaders::{BuildPolicy, ShaderSources};
use backend::system::WindowConfig;

const VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 330 core
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

const TRIANGLE: [Vec3; 3] = [
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(0.0, 0.5, 0.0),
];

/// Everything the program is configured with. There is no file or CLI
/// layer; `Default` is the configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub window: WindowConfig,
    pub scene: SceneDesc,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            logging: LoggingConfig::default(),
            window: WindowConfig::default(),
            scene: SceneDesc {
                vertices: TRIANGLE.to_vec(),
                shaders: ShaderSources::from_str(VERTEX_SHADER, FRAGMENT_SHADER),
                clear_color: [0.0, 0.0, 0.0, 1.0],
                policy: BuildPolicy::Continue,
            },
        }
    }
}
