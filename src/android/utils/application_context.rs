use super::jni_platform::JniPlatform;
use crate::core::{config::CONFIG_FILE_NAME, error::ShimError};
use jni::{
    objects::{JObject, JString},
    JNIEnv,
};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ApplicationContext {
    pub data_dir: PathBuf,
}

impl ApplicationContext {
    pub fn build(platform: &JniPlatform) -> Result<Self, ShimError> {
        let data_dir = platform.run("Context.getFilesDir", |env, activity| {
            Self::get_path(env, activity, "getFilesDir")
        })?;
        Ok(Self { data_dir })
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    fn get_path(env: &mut JNIEnv, activity: &JObject, method: &str) -> jni::errors::Result<PathBuf> {
        let file = env
            .call_method(activity, method, "()Ljava/io/File;", &[])?
            .l()?;
        let path = env
            .call_method(&file, "getAbsolutePath", "()Ljava/lang/String;", &[])?
            .l()?;
        let path: String = env.get_string(&JString::from(path))?.into();
        Ok(PathBuf::from(path))
    }
}
