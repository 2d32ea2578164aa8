use env_var::{env, EnvVarError, IntOptions};
use serial_test::serial;

#[test]
#[serial]
fn test_required_reads_process_environment() {
    temp_env::with_var("ENV_VAR_TEST_WORKERS", Some("12"), || {
        let workers = env("ENV_VAR_TEST_WORKERS")
            .as_int_with(IntOptions::new().min(1))
            .unwrap()
            .required();
        assert_eq!(workers, Ok(12));
    });
}

#[test]
#[serial]
fn test_unset_variable() {
    temp_env::with_var_unset("ENV_VAR_TEST_PORT", || {
        assert_eq!(
            env("ENV_VAR_TEST_PORT").as_port_number().required(),
            Err(EnvVarError::NotDefined {
                var_name: "ENV_VAR_TEST_PORT".to_string()
            })
        );
        assert_eq!(env("ENV_VAR_TEST_PORT").as_port_number().optional(), Ok(None));
        assert_eq!(
            env("ENV_VAR_TEST_PORT").as_port_number().default(3000).required(),
            Ok(3000)
        );
    });
}

#[test]
#[serial]
fn test_value_is_read_at_resolution_time() {
    let resolver = env("ENV_VAR_TEST_DEBUG").as_bool();
    temp_env::with_var("ENV_VAR_TEST_DEBUG", Some("yes"), || {
        assert_eq!(resolver.required(), Ok(true));
    });
}

#[test]
#[serial]
fn test_float_list_from_process_environment() {
    temp_env::with_var("ENV_VAR_TEST_WEIGHTS", Some("0.5,1.5,-2"), || {
        assert_eq!(
            env("ENV_VAR_TEST_WEIGHTS").as_float_list().required(),
            Ok(vec![0.5, 1.5, -2.0])
        );
    });
}

#[test]
#[serial]
fn test_dotenv_file_feeds_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.env");
    std::fs::write(&path, "ENV_VAR_TEST_DOTENV_HOST=db.internal\n").unwrap();

    temp_env::with_var_unset("ENV_VAR_TEST_DOTENV_HOST", || {
        dotenvy::from_filename(&path).unwrap();
        assert_eq!(
            env("ENV_VAR_TEST_DOTENV_HOST").as_hostname().required(),
            Ok("db.internal".to_string())
        );
    });
}
