/// Expands each listed `async fn(BackendTest)` into one `#[test]` per enabled
/// backend. The in-process memory backend is always included.
#[macro_export]
macro_rules! backend_tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+
    ) => {
        mod memory {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::TestRunner::new(
                        $crate::db::memory::SetupMemory::new()
                    );

                    test.run_test(|test| async move {
                        super::$f(test).await;
                    });
                }
            )*
        }

        #[cfg(feature = "sqlite")]
        mod sqlite {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::TestRunner::new(
                        $crate::db::sqlite::SetupSqlite::new()
                    );

                    test.run_test(|test| async move {
                        super::$f(test).await;
                    });
                }
            )*
        }

        #[cfg(feature = "mysql")]
        mod mysql {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::TestRunner::new(
                        $crate::db::mysql::SetupMySQL::new()
                    );

                    test.run_test(|test| async move {
                        super::$f(test).await;
                    });
                }
            )*
        }

        #[cfg(feature = "postgresql")]
        mod postgresql {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::TestRunner::new(
                        $crate::db::postgresql::SetupPostgreSQL::new()
                    );

                    test.run_test(|test| async move {
                        super::$f(test).await;
                    });
                }
            )*
        }

        #[cfg(feature = "mongodb")]
        mod mongodb {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::TestRunner::new(
                        $crate::db::mongodb::SetupMongoDb::new()
                    );

                    test.run_test(|test| async move {
                        super::$f(test).await;
                    });
                }
            )*
        }
    };
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident,
        )+
    ) => {
        $crate::backend_tests!( $(
            $( #[$attrs] )*
            $f
        ),+ );
    }
}
