//! Macros.

/// Logging macro, inactive in bench mode.
///
/// Levels are `@info` (`-v`), `@verb` (`-vv`) and `@debug` (`-vvv`). Each
/// line of the message is prefixed with `; `. Several messages can be given,
/// separated by `;`.
#[macro_export]
#[cfg(not(feature = "bench"))]
macro_rules! log {
    (|cond_of| info) => ($crate::common::conf.verb >= 1);
    (|cond_of| verb) => ($crate::common::conf.verb >= 2);
    (|cond_of| debug) => ($crate::common::conf.verb >= 3);

    (|internal| $( $str:expr $(, $args:expr)* );* $(;)?) => ({
        $(
            for line in format!($str $(, $args)*).lines() {
                if line.is_empty() {
                    println!()
                } else {
                    println!("; {}", line)
                }
            }
        )*
    });

    (@ $level:ident $($tail:tt)*) => (
        if $crate::log!(|cond_of| $level) {
            $crate::log!(|internal| $($tail)*)
        }
    );
}
#[macro_export]
#[cfg(feature = "bench")]
macro_rules! log {
    ($($tt:tt)*) => {
        ()
    };
}

/// Warning macro, always active except in bench mode.
#[macro_export]
#[cfg(not(feature = "bench"))]
macro_rules! warn {
    ( $( $str:expr $(, $args:expr)* );* $(;)? ) => ({
        println!(
            "; {}", $crate::common::ColorExt::sad(&*$crate::common::conf, "|===| Warning:")
        );
        $(
            for line in format!($str $(, $args)*).lines() {
                println!("; {} {}", $crate::common::ColorExt::sad(&*$crate::common::conf, "|"), line)
            }
        )*
        println!("; {}", $crate::common::ColorExt::sad(&*$crate::common::conf, "|===|"))
    });
}
#[macro_export]
#[cfg(feature = "bench")]
macro_rules! warn {
    ($($tt:tt)*) => {
        ()
    };
}

/// Profiling macro.
///
/// If passed `self`, assumes `self` has a `_profiler` field.
#[macro_export]
#[cfg(not(feature = "bench"))]
macro_rules! profile {
    ( | $prof:ident | wrap $b:block $( $scope:expr ),+ $(,)? ) => ({
        $crate::profile! { |$prof| tick $($scope),+ }
        let res = $b;
        $crate::profile! { |$prof| mark $($scope),+ }
        res
    });
    ( | $prof:ident | $stat:expr => add $e:expr ) => (
        $prof.stat_do($stat, |val| val + $e)
    );
    ( | $prof:ident | $meth:ident $( $scope:expr ),+ $(,)? ) => (
        $prof.$meth(vec![ $($scope),+ ])
    );
    ( $slf:ident wrap $b:block $( $scope:expr ),+ $(,)? ) => ({
        let prof = &$slf._profiler;
        $crate::profile! { |prof| wrap $b $($scope),+ }
    });
    ( $slf:ident $stat:expr => add $e:expr ) => ({
        let prof = &$slf._profiler;
        $crate::profile! { |prof| $stat => add $e }
    });
    ( $slf:ident $meth:ident $( $scope:expr ),+ $(,)? ) => ({
        let prof = &$slf._profiler;
        $crate::profile! { |prof| $meth $($scope),+ }
    });
}
#[macro_export]
#[cfg(feature = "bench")]
macro_rules! profile {
    ( | $prof:ident | wrap $b:block $( $scope:expr ),+ $(,)? ) => {
        $b
    };
    ( $slf:ident wrap $b:block $( $scope:expr ),+ $(,)? ) => {
        $b
    };
    ( $($tt:tt)* ) => {
        ()
    };
}

